//! Timestamp rendering
//!
//! Entries are stamped in UTC. Every built-in formatter renders ISO 8601 with
//! millisecond precision and a `Z` suffix by default; the timestamped text
//! formatter can be switched to another [`TimestampFormat`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Render `datetime` as `2024-01-15T10:30:00.000Z`.
#[inline]
pub fn iso8601_millis(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Timestamp layouts for text output
///
/// # Examples
///
/// ```
/// use rust_fanout_logger::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// assert_eq!(TimestampFormat::Iso8601.format(&at), "2024-01-15T10:30:00.000Z");
/// assert_eq!(TimestampFormat::Custom("%Y-%m-%d".to_string()).format(&at), "2024-01-15");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with offset: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format; an invalid pattern renders as [`TimestampFormat::Iso8601`]
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => iso8601_millis(datetime),
            TimestampFormat::Iso8601Micros => {
                datetime.to_rfc3339_opts(SecondsFormat::Micros, true)
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Millis, false),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut rendered = String::new();
                match write!(rendered, "{}", datetime.format(format_str)) {
                    Ok(()) => rendered,
                    Err(_) => iso8601_millis(datetime),
                }
            }
        }
    }
}
