//! Serializable logger settings
//!
//! Formatter functions cannot be deserialized, so settings name the common
//! choices instead and are turned into [`ConfigOverrides`]. Unknown keys
//! are rejected.

use super::config::ConfigOverrides;
use super::error::{LoggerError, Result};
use super::formatters::{self, NameFormatter};
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// # Examples
///
/// ```
/// use rust_named_logger::LoggerSettings;
///
/// let settings = LoggerSettings::from_json(
///     r#"{ "level": "DEBUG", "template": "%l %n:", "name_brackets": ["<", ">"] }"#,
/// ).unwrap();
/// let overrides = settings.into_overrides().unwrap();
/// assert_eq!(overrides.template.as_deref(), Some("%l %n:"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSettings {
    /// Unknown level names fall back to the default level
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_level"
    )]
    pub level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TimestampFormat>,
    /// Opening and closing string around the name, exactly two elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_brackets: Option<Vec<String>>,
    /// Truncate names to this many characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_max_len: Option<usize>,
    /// `false` swaps the colored level and name formatters for plain ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<bool>,
}

fn lenient_level<'de, D>(deserializer: D) -> std::result::Result<Option<LogLevel>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.map(|name| LogLevel::parse_or_default(&name)))
}

impl LoggerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_overrides(self) -> Result<ConfigOverrides> {
        ConfigOverrides::try_from(self)
    }

    fn name_formatter(&self) -> Result<Option<NameFormatter>> {
        let use_colors = self.colors.unwrap_or(true);
        let touches_name =
            self.name_brackets.is_some() || self.name_max_len.is_some() || self.colors.is_some();
        if !touches_name {
            return Ok(None);
        }

        let brackets = match self.name_brackets {
            Some(ref pair) => Some(formatters::bracket_name(pair)?),
            None => None,
        };
        let max_len = self.name_max_len;

        let formatter: NameFormatter = Arc::new(move |name: &str| {
            let name = match max_len {
                Some(max) => name.chars().take(max).collect::<String>(),
                None => name.to_string(),
            };
            let name = match brackets {
                Some(ref wrap) => wrap(name.as_str()),
                None => name,
            };
            if use_colors {
                formatters::format_name(&name)
            } else {
                name
            }
        });
        Ok(Some(formatter))
    }
}

impl TryFrom<LoggerSettings> for ConfigOverrides {
    type Error = LoggerError;

    fn try_from(settings: LoggerSettings) -> Result<Self> {
        let mut overrides = ConfigOverrides::new();

        if let Some(formatter) = settings.name_formatter()? {
            overrides = overrides.with_name_formatter(formatter);
        }
        if settings.colors == Some(false) {
            overrides = overrides.with_level_formatter(formatters::plain_level());
        }
        if let Some(level) = settings.level {
            overrides = overrides.with_level(level);
        }
        if let Some(template) = settings.template {
            overrides = overrides.with_template(template);
        }
        if let Some(timestamp) = settings.timestamp {
            overrides = overrides.with_timestamp_formatter(timestamp.formatter());
        }

        Ok(overrides)
    }
}
