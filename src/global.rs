//! Process-wide default logger
//!
//! The default logger is created on first access with an INFO threshold, a
//! console transport and the simple formatter. [`set_default_logger`] replaces
//! it and [`reset_default_logger`] returns to the uninitialised state, so the
//! next [`default_logger`] call builds a fresh one.
//!
//! ```
//! use rust_fanout_logger::global;
//! use rust_fanout_logger::{LogLevel, Logger};
//!
//! global::set_default_logger(Logger::builder().level(LogLevel::Debug).build());
//! assert_eq!(global::default_logger().level(), LogLevel::Debug);
//!
//! global::reset_default_logger();
//! assert_eq!(global::default_logger().level(), LogLevel::Info);
//! ```

use crate::core::{LogLevel, Logger};
use crate::formatters::SimpleFormatter;
use crate::transports::ConsoleTransport;
use parking_lot::{const_rwlock, RwLock};
use std::sync::Arc;

static DEFAULT_LOGGER: RwLock<Option<Arc<Logger>>> = const_rwlock(None);

fn build_default() -> Logger {
    Logger::builder()
        .level(LogLevel::Info)
        .transport(ConsoleTransport::new())
        .formatter(SimpleFormatter)
        .build()
}

/// The default logger, created on first access
pub fn default_logger() -> Arc<Logger> {
    if let Some(ref logger) = *DEFAULT_LOGGER.read() {
        return Arc::clone(logger);
    }

    let mut slot = DEFAULT_LOGGER.write();
    // Another caller may have initialised it between the two locks
    Arc::clone(slot.get_or_insert_with(|| Arc::new(build_default())))
}

/// Replace the default logger
pub fn set_default_logger(logger: Logger) {
    *DEFAULT_LOGGER.write() = Some(Arc::new(logger));
}

/// Forget the default logger; the next access creates a new one
pub fn reset_default_logger() {
    *DEFAULT_LOGGER.write() = None;
}

/// Whether a default logger currently exists
pub fn is_initialized() -> bool {
    DEFAULT_LOGGER.read().is_some()
}
