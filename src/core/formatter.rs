//! Formatter trait for rendering log entries

use super::log_entry::LogEntry;

/// Renders an entry to a display string.
///
/// Implementations must be pure: no side effects, safe to call repeatedly
/// and from several threads at once, and must not panic on any entry.
///
/// Any `Fn(&LogEntry) -> String` closure is a formatter:
///
/// ```
/// use rust_fanout_logger::{Formatter, LogEntry, LogLevel};
///
/// let bare = |entry: &LogEntry| entry.message.clone();
/// let entry = LogEntry::new(LogLevel::Info, "hello");
/// assert_eq!(bare.format(&entry), "hello");
/// ```
pub trait Formatter: Send + Sync {
    fn format(&self, entry: &LogEntry) -> String;
}

impl<F> Formatter for F
where
    F: Fn(&LogEntry) -> String + Send + Sync,
{
    fn format(&self, entry: &LogEntry) -> String {
        self(entry)
    }
}
