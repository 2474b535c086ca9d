//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Threshold a freshly bootstrapped logger starts with.
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Threshold only. Nothing is ever emitted at this level.
    Silent = 5,
}

impl Default for LogLevel {
    fn default() -> Self {
        DEFAULT_LEVEL
    }
}

impl LogLevel {
    /// Levels that have an emit operation, lowest first.
    pub const EMITTING: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Silent => "SILENT",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(LogLevel::Trace),
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Warn),
            4 => Some(LogLevel::Error),
            5 => Some(LogLevel::Silent),
            _ => None,
        }
    }

    /// Parse a level name, falling back to [`DEFAULT_LEVEL`] for anything unknown.
    pub fn parse_or_default(name: &str) -> Self {
        name.trim().parse().unwrap_or(DEFAULT_LEVEL)
    }

    /// Color name handed to the styling layer by the default level formatter.
    pub fn color_name(&self) -> &'static str {
        match self {
            LogLevel::Trace => "magenta",
            LogLevel::Debug => "cyan",
            LogLevel::Info => "blue",
            LogLevel::Warn => "yellow",
            LogLevel::Error => "red",
            LogLevel::Silent => "white",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "SILENT" | "OFF" => Ok(LogLevel::Silent),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
