//! Core logger types and traits

pub mod appender;
pub mod base_logger;
pub mod config;
pub mod error;
pub mod formatters;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod settings;
pub mod sink;
pub mod timestamp;

pub use appender::Appender;
pub use base_logger::{BaseLogger, LevelLog};
pub use config::{ConfigOverrides, LoggerConfig};
pub use error::{LoggerError, Result};
pub use formatters::{
    LevelFormatter, LineFormat, NameFormatter, TimestampFormatter, DEFAULT_TEMPLATE,
};
pub use log_entry::LogEntry;
pub use log_level::{LogLevel, DEFAULT_LEVEL};
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use registry::{global, Registry, RegistryBuilder, ROOT_LOGGER_NAME};
pub use settings::LoggerSettings;
pub use sink::Sink;
pub use timestamp::{date_to_iso_string, TimestampFormat};
