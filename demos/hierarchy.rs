//! Child loggers and custom formatting
//!
//! Run with: cargo run --example hierarchy

use rust_named_logger::core::formatters::{bracket_name, level_initial, truncate_name};
use rust_named_logger::prelude::*;

fn main() -> Result<()> {
    let registry = Registry::new();

    // Only the first letter of the level, numeric timestamp, names cut to 5 letters
    let advanced = registry.get_logger(
        "super-long-logger-name-maybe-too-much",
        Some(LogLevel::Debug),
        &ConfigOverrides::new()
            .with_level_formatter(level_initial())
            .with_timestamp_formatter(TimestampFormat::UnixMillis.formatter())
            .with_name_formatter(truncate_name(5))
            .with_template("#%l# logger: %n - timestamp: %t - message:"),
    )?;
    advanced.info("This library is great!");

    // Children start from the parent's formatting
    let child = advanced.get_child(
        "advanced.child",
        None,
        &ConfigOverrides::new().with_name_formatter(bracket_name(&["<", ">"])?),
    )?;
    child.debug("inherits everything but the name formatter");

    // Settings can come from JSON as well
    let overrides = LoggerSettings::from_json(
        r#"{ "level": "info", "template": "%t %l %n:", "timestamp": "iso8601_seconds" }"#,
    )?
    .into_overrides()?;
    let from_json = registry.get_logger("json", None, &overrides)?;
    from_json.info("configured from settings");

    println!("\nRegistered loggers:");
    for (name, logger) in registry.list_loggers() {
        println!("  {:<40} {}", name, logger.level());
    }

    Ok(())
}
