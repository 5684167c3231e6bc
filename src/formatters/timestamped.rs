//! Text formatter with a leading timestamp

use super::render_text;
use crate::core::{Formatter, LogEntry, TimestampFormat};

/// `[timestamp] [LEVEL] [context] message`, followed by data and error when
/// present. The timestamp is ISO 8601 with milliseconds unless another
/// [`TimestampFormat`] is chosen.
#[derive(Debug, Clone, Default)]
pub struct TimestampedFormatter {
    timestamp_format: TimestampFormat,
}

impl TimestampedFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format for this formatter
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_fanout_logger::{TimestampFormat, TimestampedFormatter};
    ///
    /// let formatter = TimestampedFormatter::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }
}

impl Formatter for TimestampedFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        let prefix = format!("[{}] ", self.timestamp_format.format(&entry.timestamp));
        render_text(prefix, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorInfo, LogData, LogLevel};
    use chrono::{TimeZone, Utc};

    fn at_fixed_time(entry: LogEntry) -> LogEntry {
        entry.with_timestamp(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
    }

    #[test]
    fn test_without_context() {
        let entry = at_fixed_time(LogEntry::new(LogLevel::Info, "Test message"));
        assert_eq!(
            TimestampedFormatter::new().format(&entry),
            "[2024-01-15T10:30:00.000Z] [INFO] Test message"
        );
    }

    #[test]
    fn test_with_context_data_and_error() {
        let mut data = LogData::new();
        data.insert("port".to_string(), serde_json::json!(8080));

        let entry = at_fixed_time(
            LogEntry::new(LogLevel::Error, "bind failed")
                .with_context("Server")
                .with_data(data)
                .with_error(ErrorInfo::new("AddrInUse", "address in use")),
        );
        assert_eq!(
            TimestampedFormatter::new().format(&entry),
            "[2024-01-15T10:30:00.000Z] [ERROR] [Server] bind failed {\"port\":8080}\naddress in use"
        );
    }

    #[test]
    fn test_empty_data_is_omitted() {
        let entry = at_fixed_time(LogEntry::new(LogLevel::Debug, "tick").with_data(LogData::new()));
        assert_eq!(
            TimestampedFormatter::new().format(&entry),
            "[2024-01-15T10:30:00.000Z] [DEBUG] tick"
        );
    }

    #[test]
    fn test_custom_timestamp_format() {
        let formatter = TimestampedFormatter::new()
            .with_timestamp_format(TimestampFormat::Custom("%H:%M:%S".to_string()));
        let entry = at_fixed_time(LogEntry::new(LogLevel::Trace, "step"));
        assert_eq!(formatter.format(&entry), "[10:30:00] [TRACE] step");
    }

    #[test]
    fn test_invalid_custom_format_does_not_panic() {
        let formatter = TimestampedFormatter::new()
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));
        let entry = at_fixed_time(LogEntry::new(LogLevel::Info, "Test message"));

        let rendered = std::panic::catch_unwind(|| formatter.format(&entry));
        assert_eq!(
            rendered.ok().as_deref(),
            Some("[2024-01-15T10:30:00.000Z] [INFO] Test message")
        );
    }
}
