//! In-memory transport for test harnesses

use crate::core::{Formatter, LogEntry, LogLevel, Result, Transport};
use parking_lot::Mutex;

/// Keeps every received entry, unformatted and in arrival order.
///
/// The buffer is unbounded. Readers get copies, so later writes never change
/// a snapshot already handed out.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::{LogLevel, Logger, MemoryTransport};
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryTransport::new());
/// let logger = Logger::builder().shared_transport(memory.clone()).build();
///
/// logger.info("ready");
/// assert_eq!(memory.entries_at(LogLevel::Info).len(), 1);
/// ```
pub struct MemoryTransport {
    name: String,
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self {
            name: "memory".to_string(),
            entries: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Copy of every entry received so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Copy of the entries at exactly `level`, original order preserved
    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every stored entry
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, entry: &LogEntry, _fallback: &dyn Formatter) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }
}
