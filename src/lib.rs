//! # Rust Fanout Logger
//!
//! A minimal structured logging library: a severity filter, pluggable
//! formatters and fan-out to any number of transports.
//!
//! ## Features
//!
//! - **Leveled**: `ERROR < WARN < INFO < DEBUG < TRACE`, filtered per logger
//! - **Contextual**: colon-joined context labels through child loggers
//! - **Structured**: per-call JSON data and captured errors
//! - **Pluggable**: any formatter with any transport; simple, timestamped and JSON built in
//! - **Isolated**: a failing transport never breaks logging or its siblings
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryTransport::new());
//! let logger = Logger::builder()
//!     .level(LogLevel::Info)
//!     .shared_transport(memory.clone())
//!     .build();
//!
//! let db = logger.child("Db")?;
//! db.warn_with("slow query", LogOptions::new().field("ms", 812));
//!
//! assert_eq!(
//!     SimpleFormatter.format(&memory.entries()[0]),
//!     r#"[WARN] [Db] slow query {"ms":812}"#
//! );
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod formatters;
pub mod global;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        parse_level, ErrorInfo, Formatter, LogData, LogEntry, LogLevel, LogOptions, Logger,
        LoggerBuilder, LoggerError, Result, Transport,
    };
    pub use crate::formatters::{JsonFormatter, SimpleFormatter, TimestampedFormatter};
    pub use crate::global::{default_logger, reset_default_logger, set_default_logger};
    pub use crate::transports::{CallbackTransport, ConsoleTransport, MemoryTransport};
}

pub use crate::core::{
    parse_level, ErrorInfo, Formatter, LogData, LogEntry, LogLevel, LogOptions, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, Result, TimestampFormat, Transport,
    TransportFailure,
};
pub use crate::formatters::{JsonFormatter, SimpleFormatter, TimestampedFormatter};
pub use crate::global::{default_logger, reset_default_logger, set_default_logger};
#[cfg(feature = "file")]
pub use crate::transports::FileTransport;
pub use crate::transports::{
    CallbackTransport, CallbackTransportBuilder, ConsoleChannel, ConsoleTransport, MemoryTransport,
};
