//! Named logger implementation

use super::{
    base_logger::{BaseLogger, LevelLog},
    config::{ConfigOverrides, LoggerConfig},
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::LogLevel,
    registry::RegistryState,
    sink::Sink,
};
use chrono::Local;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// A named logger with its own threshold and line format.
///
/// Loggers are created through a [`Registry`](super::Registry), either
/// directly or as children of another logger, and live as long as the
/// registry. A child copies its parent's configuration once, when it is
/// created; later changes to the parent are not propagated.
pub struct Logger {
    base: BaseLogger,
    config: RwLock<LoggerConfig>,
    registry: Weak<RegistryState>,
}

impl Logger {
    pub(crate) fn new(
        name: impl Into<String>,
        config: LoggerConfig,
        sink: Arc<Sink>,
        registry: Weak<RegistryState>,
    ) -> Self {
        Self {
            base: BaseLogger::new(name, config.level, sink),
            config: RwLock::new(config),
            registry,
        }
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    /// Update the configuration.
    ///
    /// Fields present in `overrides` replace the current ones. With `reset`
    /// the process defaults are used as the starting point instead, so
    /// `configure(&ConfigOverrides::new(), true)` drops every earlier
    /// customisation, threshold included.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_named_logger::{ConfigOverrides, LogLevel, Registry};
    ///
    /// let registry = Registry::new();
    /// let db = registry.get_logger("db", None, &ConfigOverrides::new()).unwrap();
    ///
    /// db.configure(&ConfigOverrides::new().with_template("%n:").with_level(LogLevel::Debug), false);
    /// assert_eq!(db.level(), LogLevel::Debug);
    ///
    /// db.configure(&ConfigOverrides::new(), true);
    /// assert_eq!(db.config().template, "[%t] %l [%n]:");
    /// ```
    pub fn configure(&self, overrides: &ConfigOverrides, reset: bool) {
        let mut config = self.config.write();
        let merged = LoggerConfig::merge(&config, overrides, reset);
        self.base.set_level(merged.level);
        *config = merged;
    }

    /// Get or create the logger called `name`.
    ///
    /// A new logger starts from this logger's configuration with
    /// `overrides` applied. Its threshold is `level` if given, else the
    /// level in `overrides`, else this logger's threshold.
    ///
    /// If `name` already exists the existing logger is returned unchanged
    /// and `level` and `overrides` are ignored.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `name` is empty.
    pub fn get_child(
        &self,
        name: &str,
        level: Option<LogLevel>,
        overrides: &ConfigOverrides,
    ) -> Result<Arc<Logger>> {
        validate_name(name)?;
        let registry = self.registry.upgrade().ok_or(LoggerError::RegistryClosed)?;

        registry.get_or_create(name, || {
            let mut config = LoggerConfig::merge(&self.config(), overrides, false);
            config.level = level.or(overrides.level).unwrap_or_else(|| self.level());
            config
        })
    }

    pub fn set_level(&self, level: LogLevel) {
        let mut config = self.config.write();
        config.level = level;
        self.base.set_level(level);
    }

    pub fn level(&self) -> LogLevel {
        self.base.level()
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.base.enabled(level)
    }

    /// Render and write `message` if `level` passes the threshold
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.base.enabled(level) {
            self.base.sink().metrics().record_filtered();
            return;
        }

        // Formatters run on a snapshot so they may call back into this logger
        let config = self.config();
        let timestamp = Local::now().fixed_offset();
        let line = config.render_line(level, self.name(), &timestamp, message.as_ref());

        self.base
            .dispatch(&LogEntry::at(level, self.name(), line, timestamp));
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    pub fn flush(&self) -> Result<()> {
        self.base.sink().flush()
    }
}

impl LevelLog for Logger {
    fn set_level(&self, level: LogLevel) {
        Logger::set_level(self, level);
    }

    fn level(&self) -> LogLevel {
        Logger::level(self)
    }

    fn log(&self, level: LogLevel, message: &str) {
        Logger::log(self, level, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("config", &*self.config.read())
            .finish()
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LoggerError::invalid_argument(
            "name",
            "You must supply a name when creating a logger",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::formatters::{level_initial, plain_level, plain_name, truncate_name};
    use crate::core::Registry;

    fn registry_with_memory() -> (Registry, MemoryAppender) {
        let memory = MemoryAppender::new();
        let registry = Registry::builder().appender(memory.clone()).build();
        (registry, memory)
    }

    fn plain() -> ConfigOverrides {
        ConfigOverrides::new()
            .with_level_formatter(plain_level())
            .with_name_formatter(plain_name())
            .with_timestamp_formatter(Arc::new(|_: &chrono::DateTime<chrono::FixedOffset>| {
                "TS".to_string()
            }))
    }

    #[test]
    fn test_child_inherits_parent_config() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();
        let sub = root.get_child("sub", None, &ConfigOverrides::new()).expect("valid name");

        assert_eq!(sub.config(), root.config());
        assert_eq!(sub.level(), root.level());
    }

    #[test]
    fn test_child_level_does_not_touch_parent() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();
        let sub = root
            .get_child("sub2", Some(LogLevel::Error), &ConfigOverrides::new())
            .expect("valid name");

        assert_eq!(sub.level(), LogLevel::Error);
        assert_eq!(sub.config().level, LogLevel::Error);
        assert_eq!(root.level(), LogLevel::Warn);
    }

    #[test]
    fn test_child_field_override() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();
        let sub = root
            .get_child("sub3", None, &ConfigOverrides::new().with_template("new template"))
            .expect("valid name");

        let parent = root.config();
        let child = sub.config();
        assert!(Arc::ptr_eq(&child.level_formatter, &parent.level_formatter));
        assert!(Arc::ptr_eq(&child.timestamp_formatter, &parent.timestamp_formatter));
        assert!(Arc::ptr_eq(&child.name_formatter, &parent.name_formatter));
        assert!(child.format.is_none() && parent.format.is_none());
        assert_ne!(child.template, parent.template);
        assert_eq!(child.template, "new template");
    }

    #[test]
    fn test_level_argument_wins_over_override_level() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();

        let a = root
            .get_child("a", Some(LogLevel::Info), &ConfigOverrides::new().with_level(LogLevel::Error))
            .expect("valid name");
        assert_eq!(a.level(), LogLevel::Info);

        let b = root
            .get_child("b", None, &ConfigOverrides::new().with_level(LogLevel::Error))
            .expect("valid name");
        assert_eq!(b.level(), LogLevel::Error);
    }

    #[test]
    fn test_empty_child_name_is_rejected() {
        let (registry, _) = registry_with_memory();
        let err = registry
            .root()
            .get_child("", None, &ConfigOverrides::new())
            .expect_err("empty name");
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("must supply a name"));
    }

    #[test]
    fn test_repeat_request_ignores_new_arguments() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();
        let first = root
            .get_child("cached", Some(LogLevel::Debug), &ConfigOverrides::new())
            .expect("valid name");
        let second = root
            .get_child("cached", Some(LogLevel::Error), &ConfigOverrides::new().with_template("X"))
            .expect("valid name");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.level(), LogLevel::Debug);
        assert_ne!(second.config().template, "X");
    }

    #[test]
    fn test_parent_changes_do_not_reach_existing_children() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();
        let child = root.get_child("frozen", None, &ConfigOverrides::new()).expect("valid name");

        root.configure(&ConfigOverrides::new().with_template("changed").with_level(LogLevel::Trace), false);

        assert_eq!(child.level(), LogLevel::Warn);
        assert_eq!(child.config().template, "[%t] %l [%n]:");
    }

    #[test]
    fn test_filtering_and_prefix() {
        let (registry, memory) = registry_with_memory();
        let api = registry
            .get_logger("api", Some(LogLevel::Info), &plain())
            .expect("valid name");

        api.trace("t");
        api.debug("d");
        api.info("i");
        api.warn("w");
        api.error("e");

        assert_eq!(
            memory.lines(),
            vec![
                "[TS] INFO [api]: i",
                "[TS] WARN [api]: w",
                "[TS] ERROR [api]: e",
            ]
        );
        assert_eq!(memory.lines_at(LogLevel::Warn), vec!["[TS] WARN [api]: w"]);
        assert_eq!(registry.metrics().filtered_count(), 2);
    }

    #[test]
    fn test_configure_rebinds_pipeline() {
        let (registry, memory) = registry_with_memory();
        let worker = registry
            .get_logger("super-long-logger-name", Some(LogLevel::Debug), &plain())
            .expect("valid name");

        worker.configure(
            &ConfigOverrides::new()
                .with_level_formatter(level_initial())
                .with_name_formatter(truncate_name(5))
                .with_template("#%l# logger: %n - timestamp: %t - message:"),
            false,
        );
        worker.debug("configured");

        assert_eq!(
            memory.lines(),
            vec!["#D# logger: super - timestamp: TS - message: configured"]
        );
    }

    #[test]
    fn test_configure_level_updates_threshold() {
        let (registry, memory) = registry_with_memory();
        let root = registry.root();

        root.info("hidden");
        root.configure(&ConfigOverrides::new().with_level(LogLevel::Info), false);
        root.info("shown");

        assert_eq!(memory.len(), 1);
        assert_eq!(root.level(), LogLevel::Info);
    }

    #[test]
    fn test_configure_reset_restores_defaults() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();

        root.configure(&plain().with_template("T").with_format(|l, _, _| l.to_string()), false);
        assert_ne!(root.config(), LoggerConfig::default());

        root.configure(&ConfigOverrides::new(), true);
        assert_eq!(root.config(), LoggerConfig::default());
    }

    #[test]
    fn test_configure_is_idempotent() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();
        let overrides = plain().with_template("%n");

        root.configure(&overrides, false);
        let once = root.config();
        root.configure(&overrides, false);
        assert_eq!(root.config(), once);
    }

    #[test]
    fn test_set_level_keeps_config_in_sync() {
        let (registry, _) = registry_with_memory();
        let root = registry.root();
        root.set_level(LogLevel::Trace);
        assert_eq!(root.config().level, LogLevel::Trace);
        assert!(root.enabled(LogLevel::Trace));
    }

    #[test]
    fn test_level_log_trait_object() {
        let (registry, memory) = registry_with_memory();
        let db = registry
            .get_logger("db", Some(LogLevel::Trace), &plain())
            .expect("valid name");

        let handle: &dyn LevelLog = &*db;
        handle.trace("via trait");
        assert_eq!(memory.lines(), vec!["[TS] TRACE [db]: via trait"]);
    }

    #[test]
    fn test_child_of_dropped_registry() {
        let (registry, _) = registry_with_memory();
        let root = Arc::clone(registry.root());
        drop(registry);

        let err = root
            .get_child("orphan", None, &ConfigOverrides::new())
            .expect_err("registry is gone");
        assert!(matches!(err, LoggerError::RegistryClosed));
    }
}
