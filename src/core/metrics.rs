//! Logger metrics for observability
//!
//! Counters for monitoring logger health: how many entries were fanned out
//! and how many transport writes failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_fanout_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.entries_dispatched(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Entries that passed the level filter and were fanned out
    entries_dispatched: AtomicU64,

    /// Transport writes that returned an error
    write_failures: AtomicU64,

    /// Transport writes that panicked
    write_panics: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_dispatched: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            write_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_dispatched(&self) -> u64 {
        self.entries_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_panics(&self) -> u64 {
        self.write_panics.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.entries_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_panic(&self) -> u64 {
        self.write_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes (errors and panics) as a percentage of all writes attempted
    /// for `transport_count` transports per entry. Returns 0.0 before any dispatch.
    pub fn failure_rate(&self, transport_count: usize) -> f64 {
        let attempted = self.entries_dispatched() as f64 * transport_count as f64;
        if attempted == 0.0 {
            return 0.0;
        }
        let failed = (self.write_failures() + self.write_panics()) as f64;
        (failed / attempted) * 100.0
    }
}
