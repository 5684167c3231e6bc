//! Plain text formatter without a timestamp

use super::render_text;
use crate::core::{Formatter, LogEntry};

/// `[LEVEL] [context] message`, followed by data and error when present.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::{Formatter, LogEntry, LogLevel, SimpleFormatter};
///
/// let entry = LogEntry::new(LogLevel::Info, "Test message").with_context("TestModule");
/// assert_eq!(SimpleFormatter.format(&entry), "[INFO] [TestModule] Test message");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleFormatter;

impl SimpleFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for SimpleFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        render_text(String::with_capacity(entry.message.len() + 16), entry)
    }
}
