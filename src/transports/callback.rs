//! Callback transport: hands each formatted entry to user code

use crate::core::logger::panic_message;
use crate::core::{Formatter, LogEntry, LoggerError, Result, Transport, TransportFailure};
use async_trait::async_trait;
use futures_util::future::{join_all, BoxFuture};
use futures_util::FutureExt;
use parking_lot::Mutex;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Synchronous callback: receives the raw entry and its formatted line.
pub type SyncCallback = Arc<dyn Fn(&LogEntry, &str) -> Result<()> + Send + Sync>;

/// Asynchronous callback: receives owned copies and returns a future.
pub type AsyncCallback =
    Arc<dyn Fn(LogEntry, String) -> BoxFuture<'static, Result<()>> + Send + Sync>;

enum Callback {
    Sync(SyncCallback),
    Async(AsyncCallback),
}

/// Formats each entry (own formatter, else the logger default) and calls the
/// user's callback with both the entry and the formatted line.
///
/// A synchronous callback completes inside `write`. An asynchronous callback
/// is spawned on the current tokio runtime; `flush` and `close` wait for every
/// spawned call and report the ones that failed, panicked or were cancelled as
/// [`LoggerError::TransportFailures`] labelled with the operation.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::{CallbackTransport, Logger};
/// use std::sync::{Arc, Mutex};
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&lines);
/// let transport = CallbackTransport::builder()
///     .callback(move |_entry, line| {
///         sink.lock().unwrap().push(line.to_string());
///         Ok(())
///     })
///     .build()?;
///
/// let logger = Logger::builder().transport(transport).build();
/// logger.warn("cache miss");
/// assert_eq!(lines.lock().unwrap().as_slice(), ["[WARN] cache miss"]);
/// # Ok::<(), rust_fanout_logger::LoggerError>(())
/// ```
pub struct CallbackTransport {
    name: String,
    callback: Callback,
    formatter: Option<Arc<dyn Formatter>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
    failures: Arc<Mutex<Vec<LoggerError>>>,
}

impl CallbackTransport {
    /// Transport around a synchronous callback, using the logger's formatter
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&LogEntry, &str) -> Result<()> + Send + Sync + 'static,
    {
        Self::from_parts(
            "callback".to_string(),
            Callback::Sync(Arc::new(callback)),
            None,
        )
    }

    pub fn builder() -> CallbackTransportBuilder {
        CallbackTransportBuilder::new()
    }

    fn from_parts(
        name: String,
        callback: Callback,
        formatter: Option<Arc<dyn Formatter>>,
    ) -> Self {
        Self {
            name,
            callback,
            formatter,
            pending: Mutex::new(Vec::new()),
            failures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of spawned callback calls still running or not yet awaited
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    fn spawn_call(&self, runtime: &Handle, call: BoxFuture<'static, Result<()>>) {
        let outcome = CallOutcome {
            failures: Arc::clone(&self.failures),
            settled: false,
        };
        let task = runtime.spawn(async move {
            let result = AssertUnwindSafe(call).catch_unwind().await;
            outcome.settle(result);
        });

        let mut pending = self.pending.lock();
        // A finished task has already recorded its outcome
        pending.retain(|task| !task.is_finished());
        pending.push(task);
    }

    /// Wait for every spawned call, then report all failures recorded since
    /// the last flush or close under `operation`.
    async fn settle(&self, operation: &str) -> Result<()> {
        let pending = std::mem::take(&mut *self.pending.lock());
        // Join errors carry nothing new: each call records its own outcome
        let _ = join_all(pending).await;

        let failures: Vec<TransportFailure> = std::mem::take(&mut *self.failures.lock())
            .into_iter()
            .map(|error| TransportFailure {
                transport: self.name.clone(),
                error,
            })
            .collect();
        match LoggerError::from_failures(operation, failures) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Records the result of one spawned callback call.
///
/// A call dropped before it completes (runtime shutdown, abort) is recorded
/// as [`LoggerError::TaskFailed`] when the outcome is dropped.
struct CallOutcome {
    failures: Arc<Mutex<Vec<LoggerError>>>,
    settled: bool,
}

impl CallOutcome {
    fn settle(mut self, result: std::thread::Result<Result<()>>) {
        self.settled = true;
        let error = match result {
            Ok(Ok(())) => return,
            Ok(Err(err)) => err,
            Err(panic_info) => LoggerError::TaskFailed(format!(
                "callback panicked: {}",
                panic_message(panic_info.as_ref())
            )),
        };
        self.failures.lock().push(error);
    }
}

impl Drop for CallOutcome {
    fn drop(&mut self) {
        if !self.settled {
            self.failures
                .lock()
                .push(LoggerError::TaskFailed("callback call was cancelled".to_string()));
        }
    }
}

#[async_trait]
impl Transport for CallbackTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, entry: &LogEntry, fallback: &dyn Formatter) -> Result<()> {
        let formatted = match self.formatter {
            Some(ref formatter) => formatter.format(entry),
            None => fallback.format(entry),
        };

        match self.callback {
            Callback::Sync(ref callback) => callback(entry, &formatted),
            Callback::Async(ref callback) => {
                let runtime =
                    Handle::try_current().map_err(|_| LoggerError::no_runtime(&self.name))?;
                self.spawn_call(&runtime, callback(entry.clone(), formatted));
                Ok(())
            }
        }
    }

    async fn flush(&self) -> Result<()> {
        self.settle("flush").await
    }

    async fn close(&self) -> Result<()> {
        self.settle("close").await
    }
}

/// Builder for [`CallbackTransport`]; a callback is required.
pub struct CallbackTransportBuilder {
    name: String,
    callback: Option<Callback>,
    formatter: Option<Arc<dyn Formatter>>,
}

impl CallbackTransportBuilder {
    pub fn new() -> Self {
        Self {
            name: "callback".to_string(),
            callback: None,
            formatter: None,
        }
    }

    /// Set a synchronous callback, replacing any earlier one
    #[must_use = "builder methods return a new value"]
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LogEntry, &str) -> Result<()> + Send + Sync + 'static,
    {
        self.callback = Some(Callback::Sync(Arc::new(callback)));
        self
    }

    /// Set an asynchronous callback, replacing any earlier one
    ///
    /// # Example
    ///
    /// ```
    /// use rust_fanout_logger::CallbackTransport;
    ///
    /// let transport = CallbackTransport::builder()
    ///     .async_callback(|entry, line| async move {
    ///         let _ = (entry.level, line.len());
    ///         Ok::<(), rust_fanout_logger::LoggerError>(())
    ///     })
    ///     .build();
    /// assert!(transport.is_ok());
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn async_callback<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(LogEntry, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let callback: AsyncCallback = Arc::new(move |entry, line| callback(entry, line).boxed());
        self.callback = Some(Callback::Async(callback));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Build the transport; fails when no callback was supplied
    pub fn build(self) -> Result<CallbackTransport> {
        let callback = self
            .callback
            .ok_or_else(|| LoggerError::config("CallbackTransport", "a callback is required"))?;
        Ok(CallbackTransport::from_parts(
            self.name,
            callback,
            self.formatter,
        ))
    }
}

impl Default for CallbackTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
