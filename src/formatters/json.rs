//! Single-line JSON formatter

use crate::core::{timestamp::iso8601_millis, Formatter, LogEntry};
use serde_json::{Map, Value};

/// One JSON object per entry, on one line.
///
/// Keys: `level`, `message`, `timestamp`; `context`, `data` and `error` only
/// when set. Unlike the text formatters an empty `data` map is still emitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Build the JSON value without serializing it
    pub fn to_value(&self, entry: &LogEntry) -> Value {
        let mut json_obj = Map::new();

        json_obj.insert(
            "level".to_string(),
            Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert("message".to_string(), Value::String(entry.message.clone()));
        json_obj.insert(
            "timestamp".to_string(),
            Value::String(iso8601_millis(&entry.timestamp)),
        );

        if let Some(ref context) = entry.context {
            json_obj.insert("context".to_string(), Value::String(context.clone()));
        }

        if let Some(ref data) = entry.data {
            json_obj.insert("data".to_string(), Value::Object(data.clone()));
        }

        if let Some(ref error) = entry.error {
            let mut error_obj = Map::new();
            error_obj.insert("name".to_string(), Value::String(error.name.clone()));
            error_obj.insert("message".to_string(), Value::String(error.message.clone()));
            error_obj.insert(
                "stack".to_string(),
                error.stack.clone().map_or(Value::Null, Value::String),
            );
            json_obj.insert("error".to_string(), Value::Object(error_obj));
        }

        Value::Object(json_obj)
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, entry: &LogEntry) -> String {
        self.to_value(entry).to_string()
    }
}
