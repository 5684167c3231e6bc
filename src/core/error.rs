//! Error types for the logger system

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level name that is not one of the canonical five
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Write or flush attempted on a transport that was closed
    #[error("Transport '{name}' is closed")]
    TransportClosed { name: String },

    /// Async work needs a tokio runtime and none is running
    #[error("No tokio runtime available for '{name}'")]
    NoRuntime { name: String },

    /// User callback reported a failure
    #[error("Callback failed: {0}")]
    CallbackFailed(String),

    /// Spawned transport task panicked or was cancelled
    #[error("Transport task failed: {0}")]
    TaskFailed(String),

    /// One or more transports failed during an aggregate operation
    #[error("{operation} failed for {} transport(s): {}", .failures.len(), FailureList(.failures))]
    TransportFailures {
        operation: String,
        failures: Vec<TransportFailure>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// A single transport's failure inside [`LoggerError::TransportFailures`].
#[derive(Debug)]
pub struct TransportFailure {
    pub transport: String,
    pub error: LoggerError,
}

struct FailureList<'a>(&'a [TransportFailure]);

impl fmt::Display for FailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, failure) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "'{}': {}", failure.transport, failure.error)?;
        }
        Ok(())
    }
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn transport_closed(name: impl Into<String>) -> Self {
        LoggerError::TransportClosed { name: name.into() }
    }

    pub fn no_runtime(name: impl Into<String>) -> Self {
        LoggerError::NoRuntime { name: name.into() }
    }

    /// Create a callback failure
    pub fn callback<S: Into<String>>(msg: S) -> Self {
        LoggerError::CallbackFailed(msg.into())
    }

    /// Combine per-transport failures of `operation`, or `None` when there are none
    pub fn from_failures(
        operation: impl Into<String>,
        failures: Vec<TransportFailure>,
    ) -> Option<Self> {
        if failures.is_empty() {
            return None;
        }
        Some(LoggerError::TransportFailures {
            operation: operation.into(),
            failures,
        })
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Failures carried by an aggregate error; empty for every other variant
    pub fn failures(&self) -> &[TransportFailure] {
        match self {
            LoggerError::TransportFailures { failures, .. } => failures,
            _ => &[],
        }
    }
}
