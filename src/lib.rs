//! # Rust Named Logger
//!
//! Named, hierarchical loggers on top of a simple leveled console logger.
//! Every logger carries its own threshold and its own line prefix
//! (timestamp, level tag, name, template), and children start from a copy
//! of their parent's configuration.
//!
//! ## Features
//!
//! - **One logger per name**: repeated requests return the same instance
//! - **Inherited configuration**: children copy the parent's formatters,
//!   then override only what they name
//! - **Configurable prefix**: template with `%t`, `%l`, `%n` or a custom function
//! - **Thread Safe**: registry creation and reconfiguration are locked
//!
//! ## Quick Start
//!
//! ```
//! use rust_named_logger::prelude::*;
//!
//! let registry = Registry::new();
//! let db = registry
//!     .get_logger("db", Some(LogLevel::Debug), &ConfigOverrides::new())
//!     .unwrap();
//!
//! db.debug("connection pool ready");
//! registry.root().warn("running without a config file");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender};
    pub use crate::core::{
        date_to_iso_string, Appender, ConfigOverrides, LevelLog, LogEntry, LogLevel, Logger,
        LoggerConfig, LoggerError, LoggerMetrics, LoggerSettings, Registry, RegistryBuilder,
        Result, TimestampFormat, DEFAULT_LEVEL, DEFAULT_TEMPLATE, ROOT_LOGGER_NAME,
    };
}

pub use appenders::{ConsoleAppender, MemoryAppender};
pub use core::{
    date_to_iso_string, global, Appender, BaseLogger, ConfigOverrides, LevelLog, LogEntry,
    LogLevel, Logger, LoggerConfig, LoggerError, LoggerMetrics, LoggerSettings, Registry,
    RegistryBuilder, Result, Sink, TimestampFormat, DEFAULT_LEVEL, DEFAULT_TEMPLATE,
    ROOT_LOGGER_NAME,
};

use std::collections::BTreeMap;
use std::sync::Arc;

/// The root logger of the process-wide registry
pub fn root() -> &'static Arc<Logger> {
    global().root()
}

/// Get or create a logger in the process-wide registry.
///
/// # Errors
///
/// `InvalidArgument` when `name` is empty.
///
/// # Examples
///
/// ```
/// use rust_named_logger::{get_logger, ConfigOverrides, LogLevel};
///
/// let a = get_logger("worker", Some(LogLevel::Info), &ConfigOverrides::new()).unwrap();
/// let b = get_logger("worker", None, &ConfigOverrides::new()).unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
///
/// assert!(get_logger("", None, &ConfigOverrides::new()).is_err());
/// ```
pub fn get_logger(
    name: &str,
    level: Option<LogLevel>,
    overrides: &ConfigOverrides,
) -> Result<Arc<Logger>> {
    global().get_logger(name, level, overrides)
}

/// Every logger of the process-wide registry
pub fn list_loggers() -> BTreeMap<String, Arc<Logger>> {
    global().list_loggers()
}
