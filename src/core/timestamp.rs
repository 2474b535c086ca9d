//! Timestamp formatting utilities
//!
//! [`date_to_iso_string`] is the conversion used by the default timestamp
//! formatter. [`TimestampFormat`] bundles it with a few other common
//! renderings that can be turned into a [`TimestampFormatter`].

use super::formatters::TimestampFormatter;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

/// Convert a date to the RFC 3339 profile of ISO 8601, keeping its offset.
///
/// Every field is zero padded to a fixed width and the offset is always
/// numeric, so UTC renders as `+00:00` rather than `Z`.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use rust_named_logger::date_to_iso_string;
///
/// let date = FixedOffset::east_opt(3600)
///     .unwrap()
///     .with_ymd_and_hms(2019, 2, 8, 19, 2, 9)
///     .unwrap()
///     + chrono::Duration::milliseconds(432);
///
/// assert_eq!(date_to_iso_string(&date, true), "2019-02-08T19:02:09.432+01:00");
/// assert_eq!(date_to_iso_string(&date, false), "2019-02-08T19:02:09+01:00");
/// ```
#[must_use]
pub fn date_to_iso_string<Tz: TimeZone>(date: &DateTime<Tz>, milliseconds: bool) -> String {
    let pattern = if milliseconds {
        "%Y-%m-%dT%H:%M:%S%.3f%:z"
    } else {
        "%Y-%m-%dT%H:%M:%S%:z"
    };
    date.fixed_offset().format(pattern).to_string()
}

/// Ready-made timestamp renderings
///
/// # Examples
///
/// ```
/// use rust_named_logger::core::TimestampFormat;
/// use rust_named_logger::ConfigOverrides;
///
/// let overrides = ConfigOverrides::new()
///     .with_timestamp_formatter(TimestampFormat::UnixMillis.formatter());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// Local time with milliseconds and offset: `2019-02-08T19:02:09.432+01:00`
    #[default]
    Iso8601Local,

    /// Same without milliseconds: `2019-02-08T19:02:09+01:00`
    Iso8601Seconds,

    /// chrono's RFC 3339 rendering, full sub-second precision
    Rfc3339,

    /// Milliseconds since the Unix epoch: `1549648929432`
    UnixMillis,

    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz: TimeZone>(&self, datetime: &DateTime<Tz>) -> String {
        match self {
            TimestampFormat::Iso8601Local => date_to_iso_string(datetime, true),
            TimestampFormat::Iso8601Seconds => date_to_iso_string(datetime, false),
            TimestampFormat::Rfc3339 => datetime.fixed_offset().to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                // An invalid strftime pattern is printed as-is instead of panicking
                let mut out = String::new();
                match write!(out, "{}", datetime.fixed_offset().format(format_str)) {
                    Ok(()) => out,
                    Err(_) => format_str.clone(),
                }
            }
        }
    }

    /// Turn this format into a formatter usable in a logger configuration
    #[must_use]
    pub fn formatter(self) -> TimestampFormatter {
        Arc::new(move |datetime: &DateTime<FixedOffset>| self.format(datetime))
    }
}
