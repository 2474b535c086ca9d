//! Leveled logging primitive
//!
//! [`LevelLog`] is the capability set every logger offers: a settable
//! threshold and one emit operation per severity. [`BaseLogger`] implements
//! it over a shared [`Sink`] and writes messages verbatim; the named
//! [`Logger`](super::Logger) wraps one and adds the configured prefix.

use super::{log_entry::LogEntry, log_level::LogLevel, sink::Sink};
use parking_lot::RwLock;
use std::sync::Arc;

pub trait LevelLog {
    fn set_level(&self, level: LogLevel);

    fn level(&self) -> LogLevel;

    /// Write `message` if `level` passes the threshold
    fn log(&self, level: LogLevel, message: &str);

    /// Whether a message at `level` would be written
    #[inline]
    fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Silent && level >= self.level()
    }

    #[inline]
    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

pub struct BaseLogger {
    name: String,
    min_level: RwLock<LogLevel>,
    sink: Arc<Sink>,
}

impl BaseLogger {
    pub fn new(name: impl Into<String>, level: LogLevel, sink: Arc<Sink>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(level),
            sink,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sink(&self) -> &Arc<Sink> {
        &self.sink
    }

    /// Hand a rendered entry to the sink, subject to the threshold.
    ///
    /// Returns `true` if the entry was written.
    pub fn dispatch(&self, entry: &LogEntry) -> bool {
        if !self.enabled(entry.level) {
            self.sink.metrics().record_filtered();
            return false;
        }
        self.sink.write(entry);
        true
    }
}

impl LevelLog for BaseLogger {
    fn set_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.dispatch(&LogEntry::new(level, self.name.as_str(), message));
    }
}
