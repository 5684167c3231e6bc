//! File transport implementation

use crate::core::{Formatter, LogEntry, LoggerError, Result, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Appends one formatted line per entry to a file.
///
/// Output is buffered; `flush` pushes it to the file and `close` flushes and
/// releases the file. Writes after `close` fail with
/// [`LoggerError::TransportClosed`].
pub struct FileTransport {
    name: String,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    formatter: Option<Arc<dyn Formatter>>,
}

impl FileTransport {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            name: "file".to_string(),
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
            formatter: None,
        })
    }

    /// Use `formatter` instead of the logger's default
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_fanout_logger::{FileTransport, JsonFormatter};
    ///
    /// let transport = FileTransport::new("/var/log/app.jsonl")
    ///     .unwrap()
    ///     .with_formatter(JsonFormatter);
    /// ```
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush_writer(&self) -> Result<()> {
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for FileTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, entry: &LogEntry, fallback: &dyn Formatter) -> Result<()> {
        let mut output = match self.formatter {
            Some(ref formatter) => formatter.format(entry),
            None => fallback.format(entry),
        };
        output.push('\n');

        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::transport_closed(&self.name))?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.flush_writer()
    }

    async fn close(&self) -> Result<()> {
        let writer = self.writer.lock().take();
        if let Some(mut writer) = writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FileTransport {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush_writer();
    }
}
