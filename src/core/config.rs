//! Logger configuration
//!
//! [`LoggerConfig`] is always fully populated. Partial updates are expressed
//! as [`ConfigOverrides`] and applied with [`LoggerConfig::merge`]: a field
//! present in the overrides replaces the base field entirely, absent fields
//! keep the base value.

use super::formatters::{
    self, LevelFormatter, LineFormat, NameFormatter, TimestampFormatter, DEFAULT_TEMPLATE,
};
use super::log_level::{LogLevel, DEFAULT_LEVEL};
use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Formatting rules and threshold of one logger
///
/// Clones share their formatter functions; two configs compare equal when
/// they hold the same formatter instances, the same template and the same
/// level.
#[derive(Clone)]
pub struct LoggerConfig {
    pub level_formatter: LevelFormatter,
    pub timestamp_formatter: TimestampFormatter,
    pub name_formatter: NameFormatter,
    pub template: String,
    /// Replaces the template entirely when set
    pub format: Option<LineFormat>,
    pub level: LogLevel,
}

static DEFAULT_CONFIG: OnceLock<LoggerConfig> = OnceLock::new();

impl Default for LoggerConfig {
    /// The process-wide defaults. Every call hands out the same formatter
    /// instances.
    fn default() -> Self {
        DEFAULT_CONFIG
            .get_or_init(|| LoggerConfig {
                level_formatter: Arc::new(formatters::format_level),
                timestamp_formatter: Arc::new(formatters::format_timestamp),
                name_formatter: Arc::new(formatters::format_name),
                template: DEFAULT_TEMPLATE.to_string(),
                format: None,
                level: DEFAULT_LEVEL,
            })
            .clone()
    }
}

impl LoggerConfig {
    /// Apply `overrides` on top of `base`, or on top of the defaults when
    /// `reset_to_defaults` is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_named_logger::{ConfigOverrides, LoggerConfig, LogLevel};
    ///
    /// let base = LoggerConfig::default();
    /// let child = LoggerConfig::merge(&base, &ConfigOverrides::new().with_template("%n>"), false);
    ///
    /// assert_eq!(child.template, "%n>");
    /// assert_eq!(child.level, base.level);
    /// ```
    #[must_use]
    pub fn merge(base: &LoggerConfig, overrides: &ConfigOverrides, reset_to_defaults: bool) -> Self {
        let mut config = if reset_to_defaults {
            LoggerConfig::default()
        } else {
            base.clone()
        };
        config.apply(overrides);
        config
    }

    fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref formatter) = overrides.level_formatter {
            self.level_formatter = Arc::clone(formatter);
        }
        if let Some(ref formatter) = overrides.timestamp_formatter {
            self.timestamp_formatter = Arc::clone(formatter);
        }
        if let Some(ref formatter) = overrides.name_formatter {
            self.name_formatter = Arc::clone(formatter);
        }
        if let Some(ref template) = overrides.template {
            self.template = template.clone();
        }
        if let Some(ref format) = overrides.format {
            self.format = format.clone();
        }
        if let Some(level) = overrides.level {
            self.level = level;
        }
    }

    /// Build the line prefix for a message emitted at `level` by `name`
    pub fn render_prefix(
        &self,
        level: LogLevel,
        name: &str,
        timestamp: &DateTime<FixedOffset>,
    ) -> String {
        let level = (self.level_formatter)(level);
        let name = (self.name_formatter)(name);
        let timestamp = (self.timestamp_formatter)(timestamp);

        match self.format {
            Some(ref format) => format(&level, &name, &timestamp),
            None => formatters::render_template(&self.template, &level, &name, &timestamp),
        }
    }

    /// Prefix, one space, message
    pub fn render_line(
        &self,
        level: LogLevel,
        name: &str,
        timestamp: &DateTime<FixedOffset>,
        message: &str,
    ) -> String {
        let mut line = self.render_prefix(level, name, timestamp);
        line.push(' ');
        line.push_str(message);
        line
    }
}

impl PartialEq for LoggerConfig {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.level_formatter, &other.level_formatter)
            && Arc::ptr_eq(&self.timestamp_formatter, &other.timestamp_formatter)
            && Arc::ptr_eq(&self.name_formatter, &other.name_formatter)
            && self.template == other.template
            && match (&self.format, &other.format) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
            && self.level == other.level
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("template", &self.template)
            .field("format", &self.format.as_ref().map(|_| "<fn>"))
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Partial configuration: every field is optional
///
/// # Examples
///
/// ```
/// use rust_named_logger::core::formatters::{level_initial, truncate_name};
/// use rust_named_logger::{ConfigOverrides, LogLevel};
///
/// let overrides = ConfigOverrides::new()
///     .with_level(LogLevel::Debug)
///     .with_level_formatter(level_initial())
///     .with_name_formatter(truncate_name(5))
///     .with_template("#%l# logger: %n - timestamp: %t - message:");
/// ```
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    pub level_formatter: Option<LevelFormatter>,
    pub timestamp_formatter: Option<TimestampFormatter>,
    pub name_formatter: Option<NameFormatter>,
    pub template: Option<String>,
    /// `Some(None)` clears an inherited custom format
    pub format: Option<Option<LineFormat>>,
    pub level: Option<LogLevel>,
}

impl ConfigOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level_formatter(mut self, formatter: LevelFormatter) -> Self {
        self.level_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_timestamp_formatter(mut self, formatter: TimestampFormatter) -> Self {
        self.timestamp_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_name_formatter(mut self, formatter: NameFormatter) -> Self {
        self.name_formatter = Some(formatter);
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Use a custom function for the whole prefix instead of the template
    #[must_use]
    pub fn with_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&str, &str, &str) -> String + Send + Sync + 'static,
    {
        let format: LineFormat = Arc::new(format);
        self.format = Some(Some(format));
        self
    }

    /// Go back to template rendering
    #[must_use]
    pub fn without_format(mut self) -> Self {
        self.format = Some(None);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.level_formatter.is_none()
            && self.timestamp_formatter.is_none()
            && self.name_formatter.is_none()
            && self.template.is_none()
            && self.format.is_none()
            && self.level.is_none()
    }
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("level_formatter", &self.level_formatter.is_some())
            .field("timestamp_formatter", &self.timestamp_formatter.is_some())
            .field("name_formatter", &self.name_formatter.is_some())
            .field("template", &self.template)
            .field("format", &self.format.as_ref().map(Option::is_some))
            .field("level", &self.level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatters::{level_initial, plain_level, plain_name};
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .expect("valid offset")
            .with_ymd_and_hms(2019, 2, 8, 19, 2, 9)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(432)
    }

    fn plain_config() -> LoggerConfig {
        LoggerConfig::merge(
            &LoggerConfig::default(),
            &ConfigOverrides::new()
                .with_level_formatter(plain_level())
                .with_name_formatter(plain_name()),
            false,
        )
    }

    #[test]
    fn test_defaults_share_formatters() {
        assert_eq!(LoggerConfig::default(), LoggerConfig::default());
        assert_eq!(LoggerConfig::default().template, DEFAULT_TEMPLATE);
        assert_eq!(LoggerConfig::default().level, LogLevel::Warn);
        assert!(LoggerConfig::default().format.is_none());
    }

    #[test]
    fn test_merge_empty_keeps_base() {
        let base = plain_config();
        let merged = LoggerConfig::merge(&base, &ConfigOverrides::new(), false);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_replaces_only_present_fields() {
        let base = plain_config();
        let merged = LoggerConfig::merge(&base, &ConfigOverrides::new().with_template("T"), false);

        assert!(Arc::ptr_eq(&merged.level_formatter, &base.level_formatter));
        assert!(Arc::ptr_eq(&merged.name_formatter, &base.name_formatter));
        assert!(Arc::ptr_eq(&merged.timestamp_formatter, &base.timestamp_formatter));
        assert_eq!(merged.template, "T");
        assert_ne!(merged, base);
    }

    #[test]
    fn test_merge_with_reset_ignores_base() {
        let base = LoggerConfig::merge(
            &plain_config(),
            &ConfigOverrides::new().with_template("T").with_level(LogLevel::Error),
            false,
        );
        let reset = LoggerConfig::merge(&base, &ConfigOverrides::new(), true);
        assert_eq!(reset, LoggerConfig::default());

        let reset = LoggerConfig::merge(&base, &ConfigOverrides::new().with_template("X"), true);
        assert_eq!(reset.template, "X");
        assert!(Arc::ptr_eq(
            &reset.level_formatter,
            &LoggerConfig::default().level_formatter
        ));
    }

    #[test]
    fn test_render_line_with_template() {
        let config = plain_config();
        let line = config.render_line(LogLevel::Warn, "root", &fixed_datetime(), "disk almost full");
        assert_eq!(
            line,
            "[2019-02-08T19:02:09.432+01:00] WARN [root]: disk almost full"
        );
    }

    #[test]
    fn test_custom_format_overrides_template() {
        let config = LoggerConfig::merge(
            &plain_config(),
            &ConfigOverrides::new()
                .with_level_formatter(level_initial())
                .with_template("ignored %l")
                .with_format(|level, name, _ts| format!("{}/{}", level, name)),
            false,
        );
        let line = config.render_line(LogLevel::Info, "api", &fixed_datetime(), "ready");
        assert_eq!(line, "I/api ready");

        let config = LoggerConfig::merge(&config, &ConfigOverrides::new().without_format(), false);
        let line = config.render_line(LogLevel::Info, "api", &fixed_datetime(), "ready");
        assert_eq!(line, "ignored I ready");
    }

    #[test]
    fn test_overrides_is_empty() {
        assert!(ConfigOverrides::new().is_empty());
        assert!(!ConfigOverrides::new().with_level(LogLevel::Info).is_empty());
        assert!(!ConfigOverrides::new().without_format().is_empty());
    }
}
