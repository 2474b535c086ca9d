//! Formatter functions
//!
//! A logger builds the prefix of every line from three independent
//! formatters (level, name, timestamp) and either a template or a custom
//! `format` function. Everything here is pure: no shared state, no I/O.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::date_to_iso_string;
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

/// Renders the level tag.
pub type LevelFormatter = Arc<dyn Fn(LogLevel) -> String + Send + Sync>;

/// Renders the logger name.
pub type NameFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Renders the moment a line was emitted.
pub type TimestampFormatter = Arc<dyn Fn(&DateTime<FixedOffset>) -> String + Send + Sync>;

/// Builds the whole prefix from the already formatted `(level, name, timestamp)`.
/// Takes precedence over the template when configured.
pub type LineFormat = Arc<dyn Fn(&str, &str, &str) -> String + Send + Sync>;

pub const DEFAULT_TEMPLATE: &str = "[%t] %l [%n]:";

/// Apply a named terminal color.
///
/// Delegates to `colored`, which leaves the text untouched when stdout is
/// not a terminal or `NO_COLOR` is set. The decision is made for stdout
/// only: when stdout is piped, lines bound for a terminal stderr are plain
/// too. [`ConsoleAppender`](crate::appenders::ConsoleAppender) strips the
/// escape sequences from lines whose own stream is not a terminal. Without
/// the `console` feature this is the identity.
#[cfg(feature = "console")]
pub fn style(text: &str, color: &str) -> String {
    use colored::Colorize;
    text.color(color).to_string()
}

#[cfg(not(feature = "console"))]
pub fn style(text: &str, _color: &str) -> String {
    text.to_string()
}

/// Default level formatter: uppercase name colored by severity
pub fn format_level(level: LogLevel) -> String {
    style(level.to_str(), level.color_name())
}

/// Default name formatter: the name in green
pub fn format_name(name: &str) -> String {
    style(name, "green")
}

/// Default timestamp formatter
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    date_to_iso_string(timestamp, true)
}

/// Uppercase level name without color
pub fn plain_level() -> LevelFormatter {
    Arc::new(|level: LogLevel| level.to_str().to_string())
}

/// First letter of the level only: `W` for warnings
pub fn level_initial() -> LevelFormatter {
    Arc::new(|level: LogLevel| level.to_str()[..1].to_string())
}

/// Name without color
pub fn plain_name() -> NameFormatter {
    Arc::new(|name: &str| name.to_string())
}

/// Keep at most `max_chars` characters of the name
pub fn truncate_name(max_chars: usize) -> NameFormatter {
    Arc::new(move |name: &str| name.chars().take(max_chars).collect::<String>())
}

/// Wrap the name between an opening and a closing string.
///
/// `pair` must hold exactly two elements.
///
/// # Examples
///
/// ```
/// use rust_named_logger::core::formatters::bracket_name;
///
/// let formatter = bracket_name(&["<", ">"]).unwrap();
/// assert_eq!(formatter("db"), "<db>");
///
/// assert!(bracket_name(&["<"]).is_err());
/// ```
pub fn bracket_name<S: AsRef<str>>(pair: &[S]) -> Result<NameFormatter> {
    let [open, close] = pair else {
        return Err(LoggerError::wrong_count("name_brackets", 2, pair.len()));
    };
    let open = open.as_ref().to_string();
    let close = close.as_ref().to_string();
    let formatter: NameFormatter = Arc::new(move |name: &str| format!("{}{}{}", open, name, close));
    Ok(formatter)
}

/// Substitute `%l`, `%n` and `%t` in a template.
///
/// Single pass: text coming from the substituted values is never expanded
/// again. Any other `%` sequence is kept as written.
///
/// Every occurrence of a placeholder is replaced, so `"%n/%n"` renders the
/// name twice. The JavaScript `loglevel-plugin-prefix` only replaces the
/// first occurrence of each; templates ported from it that repeat a
/// placeholder will render differently.
///
/// # Examples
///
/// ```
/// use rust_named_logger::core::formatters::render_template;
///
/// let prefix = render_template("[%t] %l [%n]:", "WARN", "db", "2019-02-08T19:02:09.432+01:00");
/// assert_eq!(prefix, "[2019-02-08T19:02:09.432+01:00] WARN [db]:");
/// ```
pub fn render_template(template: &str, level: &str, name: &str, timestamp: &str) -> String {
    let mut out = String::with_capacity(template.len() + level.len() + name.len() + timestamp.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('l') => level,
            Some('n') => name,
            Some('t') => timestamp,
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push_str(replacement);
        chars.next();
    }

    out
}
