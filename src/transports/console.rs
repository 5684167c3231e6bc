//! Console transport implementation

use crate::core::{Formatter, LogEntry, LogLevel, Result, Transport};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;

/// Console channel an entry is written to.
///
/// `Error` and `Warn` go to stderr, `Info` and `Debug` to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleChannel {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleChannel {
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => ConsoleChannel::Error,
            LogLevel::Warn => ConsoleChannel::Warn,
            LogLevel::Info => ConsoleChannel::Info,
            LogLevel::Debug | LogLevel::Trace => ConsoleChannel::Debug,
        }
    }

    pub fn is_stderr(&self) -> bool {
        matches!(self, ConsoleChannel::Error | ConsoleChannel::Warn)
    }
}

pub struct ConsoleTransport {
    name: String,
    formatter: Option<Arc<dyn Formatter>>,
    use_colors: bool,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self {
            name: "console".to_string(),
            formatter: None,
            use_colors: false,
        }
    }

    /// Use `formatter` instead of the logger's default
    ///
    /// # Example
    ///
    /// ```
    /// use rust_fanout_logger::{ConsoleTransport, JsonFormatter};
    ///
    /// let transport = ConsoleTransport::new().with_formatter(JsonFormatter);
    /// ```
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Accepted for configuration compatibility; output is never colored.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn colors(&self) -> bool {
        self.use_colors
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, entry: &LogEntry, fallback: &dyn Formatter) -> Result<()> {
        let output = match self.formatter {
            Some(ref formatter) => formatter.format(entry),
            None => fallback.format(entry),
        };

        if ConsoleChannel::for_level(entry.level).is_stderr() {
            writeln!(std::io::stderr().lock(), "{}", output)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", output)?;
        }
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}
