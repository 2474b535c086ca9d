//! Appender implementations

pub mod console;
pub mod memory;

pub use console::ConsoleAppender;
pub use memory::MemoryAppender;

// Re-export trait for backward compatibility
pub use crate::core::Appender;
