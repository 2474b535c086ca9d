//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset, Local};

/// A fully rendered line on its way to the appenders.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Name of the logger that produced the line
    pub logger: String,
    /// Prefix and message, ready to print
    pub line: String,
    pub timestamp: DateTime<FixedOffset>,
}

impl LogEntry {
    pub fn new(level: LogLevel, logger: impl Into<String>, line: impl Into<String>) -> Self {
        Self::at(level, logger, line, Local::now().fixed_offset())
    }

    pub fn at(
        level: LogLevel,
        logger: impl Into<String>,
        line: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            level,
            logger: logger.into(),
            line: line.into(),
            timestamp,
        }
    }
}
