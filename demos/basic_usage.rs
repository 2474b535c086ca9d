//! Basic logger usage example
//!
//! Demonstrates the root logger, a named child and threshold filtering.
//!
//! Run with: cargo run --example basic_usage

use rust_named_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Named Logger - Basic Usage Example ===\n");

    let registry = Registry::new();
    let root = registry.root();

    println!("1. Root logger (default threshold WARN):");
    root.info("This info message is hidden");
    root.warn("This is a warning message");
    root.error("This is an error message");

    println!("\n2. Named logger at TRACE:");
    let log = registry.get_logger("MONK-LOG", Some(LogLevel::Trace), &ConfigOverrides::new())?;
    log.trace("this is a trace log");
    log.debug("this is a debug log");
    log.info("this is an info log");
    log.warn("this is a warning log");
    log.error("this is an error log");

    println!("\n3. Raising the threshold to INFO:");
    log.set_level(LogLevel::Info);
    log.trace("Trace message (hidden)");
    log.debug("Debug message (hidden)");
    log.info("Info message (visible)");

    registry.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
