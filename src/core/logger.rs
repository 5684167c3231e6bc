//! Main logger implementation

use super::{
    error::{LoggerError, Result, TransportFailure},
    formatter::Formatter,
    log_entry::{ErrorInfo, LogEntry},
    log_level::LogLevel,
    log_options::LogOptions,
    metrics::LoggerMetrics,
    transport::Transport,
};
use crate::formatters::SimpleFormatter;
use futures_util::future::join_all;
use futures_util::FutureExt;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Transport list shared between a logger and its children
type TransportList = Arc<RwLock<Vec<Arc<dyn Transport>>>>;

/// Filters by level, builds entries and fans them out to transports.
///
/// Logging is synchronous up to each transport's `write`; nothing is queued.
/// A failing or panicking transport is reported on stderr and never stops the
/// remaining transports or reaches the caller. [`Logger::flush`] and
/// [`Logger::close`] are the only points that wait for transports.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::prelude::*;
/// use std::sync::Arc;
///
/// let memory = Arc::new(MemoryTransport::new());
/// let logger = Logger::builder()
///     .level(LogLevel::Info)
///     .context("Api")
///     .shared_transport(memory.clone())
///     .build();
///
/// logger.error("e");
/// logger.debug("filtered out");
/// logger.info_with("listening", LogOptions::new().field("port", 8080));
///
/// let entries = memory.entries();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].context.as_deref(), Some("Api"));
/// ```
pub struct Logger {
    level: RwLock<LogLevel>,
    context: Option<String>,
    transports: TransportList,
    formatter: Arc<dyn Formatter>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// INFO threshold, no context, no transports, simple formatter
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: RwLock::new(LogLevel::Info),
            context: None,
            transports: Arc::new(RwLock::new(Vec::new())),
            formatter: Arc::new(SimpleFormatter),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    /// Change the threshold; applies from the next call on
    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// Whether a call at `level` would be dispatched
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level())
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Formatter handed to transports that have none of their own
    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// New logger whose context is `parent:segment`, or `segment` when this
    /// logger has no context.
    ///
    /// The child starts with this logger's level and formatter and shares its
    /// transport list: transports added to or removed from either one are seen
    /// by both. Level changes stay local. An empty segment is rejected.
    ///
    /// ```
    /// use rust_fanout_logger::Logger;
    ///
    /// let app = Logger::builder().context("App").build();
    /// let db = app.child("Db")?;
    /// assert_eq!(db.context(), Some("App:Db"));
    /// assert!(app.child("").is_err());
    /// # Ok::<(), rust_fanout_logger::LoggerError>(())
    /// ```
    pub fn child(&self, segment: &str) -> Result<Logger> {
        if segment.is_empty() {
            return Err(LoggerError::config(
                "Logger",
                "child context segment must not be empty",
            ));
        }

        let context = match self.context.as_deref().filter(|c| !c.is_empty()) {
            Some(parent) => format!("{}:{}", parent, segment),
            None => segment.to_string(),
        };

        Ok(Self {
            level: RwLock::new(self.level()),
            context: Some(context),
            transports: Arc::clone(&self.transports),
            formatter: Arc::clone(&self.formatter),
            metrics: Arc::new(LoggerMetrics::new()),
        })
    }

    /// Append a transport; later calls fan out to it after the existing ones
    pub fn add_transport(&self, transport: Arc<dyn Transport>) {
        self.transports.write().push(transport);
    }

    /// Remove the first transport named `name`; `false` when none matched
    pub fn remove_transport(&self, name: &str) -> bool {
        let mut transports = self.transports.write();
        match transports.iter().position(|t| t.name() == name) {
            Some(idx) => {
                transports.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn transport_names(&self) -> Vec<String> {
        self.transports
            .read()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    pub fn transport_count(&self) -> usize {
        self.transports.read().len()
    }

    /// Whether `other` shares this logger's transport list
    pub fn shares_transports_with(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.transports, &other.transports)
    }

    // Transports are cloned out so that writes run without the lock held and
    // list changes made during a fan-out only affect later calls.
    fn snapshot(&self) -> Vec<Arc<dyn Transport>> {
        self.transports.read().clone()
    }

    #[inline]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with(level, message, LogOptions::default());
    }

    /// Log with per-call context, data or error
    ///
    /// Does nothing, not even building the entry, when `level` is filtered out.
    pub fn log_with(&self, level: LogLevel, message: impl Into<String>, options: LogOptions) {
        if !self.is_enabled(level) {
            return;
        }

        let LogOptions {
            context,
            data,
            error,
        } = options;

        let mut entry = LogEntry::new(level, message);
        entry.context = context.or_else(|| self.context.clone());
        entry.data = data;
        entry.error = error;

        self.dispatch(&entry);
    }

    fn dispatch(&self, entry: &LogEntry) {
        self.metrics.record_dispatched();

        // Per-transport panic isolation: one failing transport never stops the others
        for transport in self.snapshot() {
            let write_result = catch_unwind(AssertUnwindSafe(|| {
                transport.write(entry, self.formatter.as_ref())
            }));

            match write_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.metrics.record_write_failure();
                    eprintln!(
                        "[LOGGER ERROR] Transport '{}' failed: {}",
                        transport.name(),
                        e
                    );
                }
                Err(panic_info) => {
                    self.metrics.record_write_panic();
                    eprintln!(
                        "[LOGGER CRITICAL] Transport '{}' panicked: {}. \
                         Other transports continue to function.",
                        transport.name(),
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    pub fn error_with(&self, message: impl Into<String>, options: LogOptions) {
        self.log_with(LogLevel::Error, message, options);
    }

    pub fn warn_with(&self, message: impl Into<String>, options: LogOptions) {
        self.log_with(LogLevel::Warn, message, options);
    }

    pub fn info_with(&self, message: impl Into<String>, options: LogOptions) {
        self.log_with(LogLevel::Info, message, options);
    }

    pub fn debug_with(&self, message: impl Into<String>, options: LogOptions) {
        self.log_with(LogLevel::Debug, message, options);
    }

    pub fn trace_with(&self, message: impl Into<String>, options: LogOptions) {
        self.log_with(LogLevel::Trace, message, options);
    }

    /// ERROR entry carrying `error`, which replaces any error in `options`
    pub fn error_with_exception(
        &self,
        message: impl Into<String>,
        error: ErrorInfo,
        options: LogOptions,
    ) {
        self.log_with(LogLevel::Error, message, options.error(error));
    }

    /// Flush every transport concurrently and wait for all of them.
    ///
    /// Every failure is collected; the result is a single
    /// [`LoggerError::TransportFailures`] listing them in transport order.
    pub async fn flush(&self) -> Result<()> {
        let transports = self.snapshot();
        let results = join_all(
            transports
                .iter()
                .map(|t| AssertUnwindSafe(t.flush()).catch_unwind()),
        )
        .await;
        collect_failures("flush", &transports, results)
    }

    /// Close every transport concurrently; failures are reported as for [`Logger::flush`]
    pub async fn close(&self) -> Result<()> {
        let transports = self.snapshot();
        let results = join_all(
            transports
                .iter()
                .map(|t| AssertUnwindSafe(t.close()).catch_unwind()),
        )
        .await;
        collect_failures("close", &transports, results)
    }
}

type Settled = std::result::Result<Result<()>, Box<dyn Any + Send>>;

fn collect_failures(
    operation: &str,
    transports: &[Arc<dyn Transport>],
    results: Vec<Settled>,
) -> Result<()> {
    let failures: Vec<TransportFailure> = transports
        .iter()
        .zip(results)
        .filter_map(|(transport, settled)| {
            let error = match settled {
                Ok(Ok(())) => return None,
                Ok(Err(e)) => e,
                Err(panic_info) => LoggerError::TaskFailed(format!(
                    "panicked during {}: {}",
                    operation,
                    panic_message(panic_info.as_ref())
                )),
            };
            Some(TransportFailure {
                transport: transport.name().to_string(),
                error,
            })
        })
        .collect();

    match LoggerError::from_failures(operation, failures) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub(crate) fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("context", &self.context)
            .field("transports", &self.transport_names())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_fanout_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .context("Worker")
///     .transport(ConsoleTransport::new())
///     .formatter(TimestampedFormatter::new())
///     .build();
/// assert_eq!(logger.transport_names(), ["console"]);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    context: Option<String>,
    transports: Vec<Arc<dyn Transport>>,
    formatter: Option<Arc<dyn Formatter>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: LogLevel::Info,
            context: None,
            transports: Vec::new(),
            formatter: None,
        }
    }

    /// Set the severity threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the default context label
    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a transport owned by the logger
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transports.push(Arc::new(transport));
        self
    }

    /// Add a transport the caller keeps a handle to
    #[must_use = "builder methods return a new value"]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Set the default formatter (simple formatter when unset)
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            level: RwLock::new(self.level),
            context: self.context,
            transports: Arc::new(RwLock::new(self.transports)),
            formatter: self
                .formatter
                .unwrap_or_else(|| Arc::new(SimpleFormatter)),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
