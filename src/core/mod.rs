//! Core logger types and traits

pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod log_options;
pub mod logger;
pub mod metrics;
pub mod timestamp;
pub mod transport;

pub use error::{LoggerError, Result, TransportFailure};
pub use formatter::Formatter;
pub use log_entry::{ErrorInfo, LogData, LogEntry};
pub use log_level::{parse_level, LogLevel};
pub use log_options::LogOptions;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
pub use transport::Transport;
