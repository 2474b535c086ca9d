//! Logger registry
//!
//! Maps names to loggers, at most one logger per name. Entries are created
//! on first request and kept for the lifetime of the registry. Every
//! registry is bootstrapped with a root logger named [`ROOT_LOGGER_NAME`].
//!
//! Registries are plain values so tests can build isolated ones; [`global`]
//! hands out the process-wide instance.

use super::{
    appender::Appender,
    config::{ConfigOverrides, LoggerConfig},
    error::Result,
    log_level::{LogLevel, DEFAULT_LEVEL},
    logger::{validate_name, Logger},
    metrics::LoggerMetrics,
    sink::Sink,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

pub const ROOT_LOGGER_NAME: &str = "root";

/// State shared between a registry and the loggers it created
pub(crate) struct RegistryState {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    sink: Arc<Sink>,
}

impl RegistryState {
    /// Return the cached logger or build one from `factory`.
    ///
    /// The factory runs without the map locked, so it may call back into
    /// the registry. When two callers race on a new name the first insert
    /// wins and the other configuration is dropped.
    pub(crate) fn get_or_create<F>(self: &Arc<Self>, name: &str, factory: F) -> Result<Arc<Logger>>
    where
        F: FnOnce() -> LoggerConfig,
    {
        validate_name(name)?;

        if let Some(existing) = self.loggers.lock().get(name) {
            return Ok(Arc::clone(existing));
        }

        let config = factory();
        let mut loggers = self.loggers.lock();
        let logger = loggers.entry(name.to_string()).or_insert_with(|| {
            Arc::new(Logger::new(
                name,
                config,
                Arc::clone(&self.sink),
                Arc::downgrade(self),
            ))
        });
        Ok(Arc::clone(logger))
    }
}

pub struct Registry {
    state: Arc<RegistryState>,
    root: Arc<Logger>,
}

impl Registry {
    /// Registry writing to the console, root at the default level
    #[must_use]
    pub fn new() -> Self {
        Self::builder().appender(ConsoleAppender::new()).build()
    }

    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn root(&self) -> &Arc<Logger> {
        &self.root
    }

    /// Get or create a logger deriving from the root.
    ///
    /// See [`Logger::get_child`] for how `level` and `overrides` are used
    /// and why they are ignored for an existing name.
    pub fn get_logger(
        &self,
        name: &str,
        level: Option<LogLevel>,
        overrides: &ConfigOverrides,
    ) -> Result<Arc<Logger>> {
        self.root.get_child(name, level, overrides)
    }

    /// Return the logger called `name`, creating it with the configuration
    /// produced by `factory` if it does not exist yet.
    ///
    /// `factory` runs outside the registry lock and may look up other
    /// loggers. It is not called for an existing name, and under a race it
    /// may run even though another caller's logger ends up registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_named_logger::{LoggerConfig, LogLevel, Registry};
    ///
    /// let registry = Registry::new();
    /// let audit = registry
    ///     .get_or_create("audit", || LoggerConfig { level: LogLevel::Info, ..LoggerConfig::default() })
    ///     .unwrap();
    /// assert_eq!(audit.level(), LogLevel::Info);
    /// ```
    pub fn get_or_create<F>(&self, name: &str, factory: F) -> Result<Arc<Logger>>
    where
        F: FnOnce() -> LoggerConfig,
    {
        self.state.get_or_create(name, factory)
    }

    /// Snapshot of every registered logger, root included
    pub fn list_loggers(&self) -> BTreeMap<String, Arc<Logger>> {
        self.state
            .loggers
            .lock()
            .iter()
            .map(|(name, logger)| (name.clone(), Arc::clone(logger)))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.loggers.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.state.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.loggers.lock().is_empty()
    }

    pub fn add_appender<A: Appender + 'static>(&self, appender: A) {
        self.state.sink.add_appender(Box::new(appender));
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.state.sink.metrics()
    }

    pub fn flush(&self) -> Result<()> {
        self.state.sink.flush()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a Registry with a fluent API
///
/// # Example
/// ```
/// use rust_named_logger::prelude::*;
///
/// let registry = Registry::builder()
///     .root_level(LogLevel::Debug)
///     .appender(ConsoleAppender::new())
///     .build();
/// assert_eq!(registry.root().level(), LogLevel::Debug);
/// ```
pub struct RegistryBuilder {
    root_level: LogLevel,
    root_overrides: ConfigOverrides,
    appenders: Vec<Box<dyn Appender>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            root_level: DEFAULT_LEVEL,
            root_overrides: ConfigOverrides::new(),
            appenders: Vec::new(),
        }
    }

    /// Set the root threshold
    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    /// Read the root threshold from an environment variable.
    ///
    /// Unset leaves the current level; unknown names fall back to the
    /// default level.
    #[must_use = "builder methods return a new value"]
    pub fn level_from_env(mut self, var: &str) -> Self {
        if let Ok(value) = std::env::var(var) {
            self.root_level = LogLevel::parse_or_default(&value);
        }
        self
    }

    /// Formatting applied to the root on top of the defaults
    #[must_use = "builder methods return a new value"]
    pub fn root_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.root_overrides = overrides;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Build the registry and its root logger
    pub fn build(self) -> Registry {
        let state = Arc::new(RegistryState {
            loggers: Mutex::new(HashMap::new()),
            sink: Arc::new(Sink::with_appenders(self.appenders)),
        });

        let mut root_config =
            LoggerConfig::merge(&LoggerConfig::default(), &self.root_overrides, false);
        root_config.level = self.root_level;

        let root = Arc::new(Logger::new(
            ROOT_LOGGER_NAME,
            root_config,
            Arc::clone(&state.sink),
            Arc::downgrade(&state),
        ));
        state
            .loggers
            .lock()
            .insert(ROOT_LOGGER_NAME.to_string(), Arc::clone(&root));

        Registry { state, root }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, bootstrapped on first use with a console
/// appender and the root at the default level.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;

    fn isolated() -> Registry {
        Registry::builder().appender(MemoryAppender::new()).build()
    }

    #[test]
    fn test_root_is_registered() {
        let registry = isolated();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ROOT_LOGGER_NAME));
        assert_eq!(registry.root().name(), ROOT_LOGGER_NAME);
        assert_eq!(registry.root().level(), LogLevel::Warn);

        let root = registry
            .get_logger(ROOT_LOGGER_NAME, Some(LogLevel::Trace), &ConfigOverrides::new())
            .expect("valid name");
        assert!(Arc::ptr_eq(&root, registry.root()));
        assert_eq!(root.level(), LogLevel::Warn);
    }

    #[test]
    fn test_get_logger_is_singleton() {
        let registry = isolated();
        let a = registry.get_logger("x", None, &ConfigOverrides::new()).expect("valid name");
        let b = registry
            .get_logger("x", Some(LogLevel::Error), &ConfigOverrides::new().with_template("T"))
            .expect("valid name");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_get_logger_requires_name() {
        let registry = isolated();
        let err = registry
            .get_logger("", None, &ConfigOverrides::new())
            .expect_err("empty name");
        assert!(err.is_invalid_argument());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_or_create_calls_factory_once() {
        let registry = isolated();
        let mut calls = 0;
        let first = registry
            .get_or_create("once", || {
                calls += 1;
                LoggerConfig::default()
            })
            .expect("valid name");
        let second = registry
            .get_or_create("once", || {
                calls += 1;
                LoggerConfig::default()
            })
            .expect("valid name");

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.get_or_create("", LoggerConfig::default).is_err());
    }

    #[test]
    fn test_get_or_create_factory_can_use_registry() {
        let registry = isolated();
        let (tx, rx) = std::sync::mpsc::channel();
        let shared = &registry;

        std::thread::scope(|scope| {
            scope.spawn(move || {
                let registry = shared;
                let audit = registry.get_or_create("audit", || {
                    let base = registry
                        .get_logger("base", None, &ConfigOverrides::new().with_template("B%n"))
                        .expect("valid name");
                    LoggerConfig {
                        level: LogLevel::Info,
                        ..base.config()
                    }
                });
                let _ = tx.send(audit);
            });

            let audit = rx
                .recv_timeout(std::time::Duration::from_secs(5))
                .expect("factory re-entering the registry must not block")
                .expect("valid name");
            assert_eq!(audit.level(), LogLevel::Info);
            assert_eq!(audit.config().template, "B%n");
        });

        assert!(registry.contains("base"));
        assert!(registry.contains("audit"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_add_appender_receives_later_lines() {
        let registry = isolated();
        let late = MemoryAppender::new();

        registry.root().error("before");
        registry.add_appender(late.clone());
        registry.root().error("after");

        assert_eq!(late.len(), 1);
        assert!(late.lines()[0].ends_with(" after"), "{:?}", late.lines());
        assert_eq!(registry.metrics().total_logged(), 2);
    }

    #[test]
    fn test_list_loggers() {
        let registry = isolated();
        for name in ["b", "a", "c"] {
            registry.get_logger(name, None, &ConfigOverrides::new()).expect("valid name");
        }

        let loggers = registry.list_loggers();
        let names: Vec<&str> = loggers.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c", "root"]);
        assert!(Arc::ptr_eq(&loggers["root"], registry.root()));
    }

    #[test]
    fn test_grandchild_registers_in_same_registry() {
        let registry = isolated();
        let parent = registry
            .get_logger("http", Some(LogLevel::Info), &ConfigOverrides::new())
            .expect("valid name");
        let child = parent
            .get_child("http.client", None, &ConfigOverrides::new())
            .expect("valid name");

        assert_eq!(child.level(), LogLevel::Info);
        assert!(registry.contains("http.client"));
    }

    #[test]
    fn test_builder_root_settings() {
        let registry = Registry::builder()
            .root_level(LogLevel::Debug)
            .root_overrides(ConfigOverrides::new().with_template("%n>"))
            .build();
        assert_eq!(registry.root().level(), LogLevel::Debug);
        assert_eq!(registry.root().config().level, LogLevel::Debug);
        assert_eq!(registry.root().config().template, "%n>");
    }

    #[test]
    fn test_level_from_env() {
        std::env::set_var("RUST_NAMED_LOGGER_TEST_LEVEL", "error");
        let registry = Registry::builder()
            .level_from_env("RUST_NAMED_LOGGER_TEST_LEVEL")
            .build();
        assert_eq!(registry.root().level(), LogLevel::Error);

        let registry = Registry::builder()
            .root_level(LogLevel::Info)
            .level_from_env("RUST_NAMED_LOGGER_TEST_UNSET_VARIABLE")
            .build();
        assert_eq!(registry.root().level(), LogLevel::Info);
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = isolated();
        let second = isolated();
        first.get_logger("only-here", None, &ConfigOverrides::new()).expect("valid name");
        assert!(!second.contains("only-here"));
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(global(), global()));
        assert!(global().contains(ROOT_LOGGER_NAME));
    }
}
