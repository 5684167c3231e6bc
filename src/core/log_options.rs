//! Per-call options for a log call

use super::log_entry::{ErrorInfo, LogData};

/// Optional extras for a single log call.
///
/// A `context` set here replaces the logger's default context for this call
/// only; the logger itself is never modified.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::{ErrorInfo, LogOptions};
///
/// let options = LogOptions::new()
///     .context("Billing")
///     .field("invoice_id", 42)
///     .error(ErrorInfo::new("Timeout", "gateway did not answer"));
/// assert_eq!(options.context.as_deref(), Some("Billing"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogOptions {
    pub context: Option<String>,
    pub data: Option<LogData>,
    pub error: Option<ErrorInfo>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Replace the whole data map
    #[must_use]
    pub fn data(mut self, data: LogData) -> Self {
        self.data = Some(data);
        self
    }

    /// Add a single data field, creating the map on first use
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data
            .get_or_insert_with(LogData::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn error(mut self, error: ErrorInfo) -> Self {
        self.error = Some(error);
        self
    }
}
