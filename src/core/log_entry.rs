//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

/// Structured key/value payload attached to an entry.
pub type LogData = serde_json::Map<String, serde_json::Value>;

/// A captured failure carried by an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Capture any error value.
    ///
    /// The name is the error's type name without its module path and the
    /// message is its `Display` output. The stack renders the `source()`
    /// chain followed by a backtrace when `RUST_BACKTRACE` enables one; it is
    /// `None` when there is neither.
    ///
    /// ```
    /// use rust_fanout_logger::ErrorInfo;
    ///
    /// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    /// let info = ErrorInfo::from_error(&err);
    /// assert_eq!(info.name, "Error");
    /// assert_eq!(info.message, "config.toml missing");
    /// ```
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let full_name = std::any::type_name::<E>();
        let name = short_type_name(full_name);

        let mut lines = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            lines.push(format!("Caused by: {cause}"));
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            lines.push(backtrace.to_string());
        }

        let stack = if lines.is_empty() {
            None
        } else {
            Some(format!("{name}: {err}\n{}", lines.join("\n")))
        };

        Self {
            name: name.to_string(),
            message: err.to_string(),
            stack,
        }
    }

    /// Stack trace when captured, otherwise the message
    pub fn stack_or_message(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

// `std::io::Error` -> `Error`, `Box<dyn std::error::Error>` -> `dyn std::error::Error`
fn short_type_name(full: &str) -> &str {
    let head = full.split('<').next().unwrap_or(full);
    head.rsplit("::").next().unwrap_or(head)
}

/// Immutable record of one accepted log call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<LogData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl LogEntry {
    /// Create an entry stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            context: None,
            data: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: LogData) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }

    /// Context to render, treating an empty label as absent
    pub fn display_context(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.is_empty())
    }

    /// Data to render in text layouts, treating an empty map as absent
    pub fn display_data(&self) -> Option<&LogData> {
        self.data.as_ref().filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl Error for Inner {}

    #[derive(Debug)]
    struct QueryFailed(Inner);

    impl fmt::Display for QueryFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("query failed")
        }
    }

    impl Error for QueryFailed {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_entry_builders() {
        let mut data = LogData::new();
        data.insert("user".to_string(), serde_json::json!("alice"));

        let entry = LogEntry::new(LogLevel::Warn, "disk almost full")
            .with_context("Storage")
            .with_data(data)
            .with_error(ErrorInfo::new("IoError", "ENOSPC"));

        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.display_context(), Some("Storage"));
        assert_eq!(entry.display_data().map(|d| d.len()), Some(1));
        assert_eq!(entry.error.as_ref().map(|e| e.name.as_str()), Some("IoError"));
    }

    #[test]
    fn test_empty_context_and_data_are_not_displayed() {
        let entry = LogEntry::new(LogLevel::Info, "x")
            .with_context("")
            .with_data(LogData::new());

        assert_eq!(entry.display_context(), None);
        assert!(entry.display_data().is_none());
        assert!(entry.data.is_some());
    }

    #[test]
    fn test_error_info_from_error_with_source_chain() {
        let info = ErrorInfo::from_error(&QueryFailed(Inner));

        assert_eq!(info.name, "QueryFailed");
        assert_eq!(info.message, "query failed");
        let stack = info.stack.as_deref().unwrap();
        assert!(stack.starts_with("QueryFailed: query failed"));
        assert!(stack.contains("Caused by: connection reset"));
    }

    #[test]
    fn test_stack_or_message() {
        let info = ErrorInfo::new("E", "boom");
        assert_eq!(info.stack_or_message(), "boom");

        let info = info.with_stack("E: boom\n  at main");
        assert_eq!(info.stack_or_message(), "E: boom\n  at main");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("std::io::error::Error"), "Error");
        assert_eq!(short_type_name("dyn core::error::Error"), "Error");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
