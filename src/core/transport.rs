//! Transport trait for log output destinations

use super::{error::Result, formatter::Formatter, log_entry::LogEntry};
use async_trait::async_trait;

/// A destination that receives log entries and performs the output.
///
/// `write` is called synchronously for every accepted entry, in the order
/// transports were registered. A transport that does asynchronous I/O starts
/// that work inside `write` and settles it in `flush`/`close`; the logger never
/// waits on it while logging. `fallback` is the logger's default formatter,
/// for transports that format but were not given a formatter of their own.
///
/// `flush` and `close` default to no-ops.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::core::{Formatter, LogEntry, Result, Transport};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct CountingTransport(AtomicUsize);
///
/// impl Transport for CountingTransport {
///     fn name(&self) -> &str {
///         "counting"
///     }
///
///     fn write(&self, _entry: &LogEntry, _fallback: &dyn Formatter) -> Result<()> {
///         self.0.fetch_add(1, Ordering::Relaxed);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Name used to look the transport up for removal
    fn name(&self) -> &str;

    /// Hand one entry to the destination
    fn write(&self, entry: &LogEntry, fallback: &dyn Formatter) -> Result<()>;

    /// Wait for outstanding output to complete
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Flush and release the destination
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
