//! Formatter implementations

pub mod json;
pub mod simple;
pub mod timestamped;

pub use json::JsonFormatter;
pub use simple::SimpleFormatter;
pub use timestamped::TimestampedFormatter;

pub use crate::core::Formatter;

use crate::core::LogEntry;
use std::fmt::Write;

/// Shared text layout: `[LEVEL] [context] message[ data-json][\nerror]`.
fn render_text(mut out: String, entry: &LogEntry) -> String {
    // Writing into a String cannot fail
    let _ = write!(out, "[{}] ", entry.level);

    if let Some(context) = entry.display_context() {
        let _ = write!(out, "[{}] ", context);
    }

    out.push_str(&entry.message);

    if let Some(data) = entry.display_data() {
        out.push(' ');
        out.push_str(&serde_json::Value::Object(data.clone()).to_string());
    }

    if let Some(ref error) = entry.error {
        out.push('\n');
        out.push_str(error.stack_or_message());
    }

    out
}
