//! Integration tests for logger system
//!
//! These tests verify:
//! - Level filtering end to end
//! - Child logger context and shared transports
//! - Formatter output contracts
//! - Transport failure isolation
//! - Aggregate flush/close semantics
//! - File output

use rust_fanout_logger::core::{Formatter, LogEntry, LoggerError, Result, Transport};
use rust_fanout_logger::prelude::*;
use rust_fanout_logger::FileTransport;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

fn memory_logger(level: LogLevel) -> (Logger, Arc<MemoryTransport>) {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .level(level)
        .shared_transport(memory.clone())
        .build();
    (logger, memory)
}

#[test]
fn test_info_logger_keeps_three_of_four() {
    let (logger, memory) = memory_logger(LogLevel::Info);

    logger.error("e");
    logger.warn("w");
    logger.info("i");
    logger.debug("d");

    let levels: Vec<LogLevel> = memory.entries().iter().map(|e| e.level).collect();
    assert_eq!(levels, [LogLevel::Error, LogLevel::Warn, LogLevel::Info]);
}

#[test]
fn test_every_threshold_pair() {
    for threshold in LogLevel::ALL {
        let (logger, memory) = memory_logger(threshold);
        for level in LogLevel::ALL {
            logger.log(level, level.to_str());
        }

        let kept: Vec<LogLevel> = memory.entries().iter().map(|e| e.level).collect();
        let expected: Vec<LogLevel> = LogLevel::ALL
            .into_iter()
            .filter(|l| l.rank() <= threshold.rank())
            .collect();
        assert_eq!(kept, expected, "threshold {}", threshold);
    }
}

#[test]
fn test_multiple_transports_receive_same_entry_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let logger = Logger::new();

    for name in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        let transport = CallbackTransport::builder()
            .name(name)
            .callback(move |_entry, _line| {
                order.lock().unwrap().push(name);
                Ok(())
            })
            .build()
            .expect("callback is set");
        logger.add_transport(Arc::new(transport));
    }

    logger.info("Test message");
    assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
}

#[test]
fn test_child_context_and_shared_transports() {
    let memory = Arc::new(MemoryTransport::new());
    let parent = Logger::builder()
        .context("A")
        .shared_transport(memory.clone())
        .build();

    let child = parent.child("B").expect("valid segment");
    assert!(child.shares_transports_with(&parent));

    // Added to the parent after the child exists
    let late = Arc::new(MemoryTransport::new().with_name("late"));
    parent.add_transport(late.clone());

    child.info("from child");
    parent.info("from parent");

    let contexts: Vec<Option<String>> = late.entries().into_iter().map(|e| e.context).collect();
    assert_eq!(contexts, [Some("A:B".to_string()), Some("A".to_string())]);
    assert_eq!(memory.len(), 2);

    // Removal through the child is visible to the parent
    assert!(child.remove_transport("late"));
    assert_eq!(parent.transport_names(), ["memory"]);
}

#[test]
fn test_child_without_parent_context() {
    let (logger, memory) = memory_logger(LogLevel::Info);
    logger.child("B").expect("valid segment").info("hello");
    assert_eq!(memory.entries()[0].context.as_deref(), Some("B"));
}

#[test]
fn test_empty_child_segment_is_rejected() {
    let logger = Logger::new();
    let err = logger.child("").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}

#[test]
fn test_per_call_options_leave_logger_untouched() {
    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .context("Fixed")
        .shared_transport(memory.clone())
        .build();

    logger.info_with(
        "with extras",
        LogOptions::new()
            .context("Override")
            .field("k", "v")
            .error(ErrorInfo::new("E", "m")),
    );
    logger.info("plain");

    let entries = memory.entries();
    assert_eq!(entries[0].context.as_deref(), Some("Override"));
    assert!(entries[0].data.is_some());
    assert!(entries[0].error.is_some());
    assert_eq!(entries[1].context.as_deref(), Some("Fixed"));
    assert!(entries[1].data.is_none());
    assert!(entries[1].error.is_none());
}

#[test]
fn test_simple_formatter_scenario() {
    let entry = LogEntry::new(LogLevel::Info, "Test message").with_context("TestModule");
    assert_eq!(SimpleFormatter.format(&entry), "[INFO] [TestModule] Test message");
}

#[test]
fn test_timestamped_formatter_scenario() {
    let at = Utc
        .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
        .single()
        .expect("valid datetime");
    let entry = LogEntry::new(LogLevel::Info, "Test message").with_timestamp(at);
    assert_eq!(
        TimestampedFormatter::new().format(&entry),
        "[2024-01-15T10:30:00.000Z] [INFO] Test message"
    );
}

#[test]
fn test_empty_data_text_vs_json() {
    let entry = LogEntry::new(LogLevel::Info, "m").with_data(LogData::new());

    assert_eq!(SimpleFormatter.format(&entry), "[INFO] m");
    assert!(!TimestampedFormatter::new().format(&entry).contains("{}"));

    let parsed: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format(&entry)).expect("valid JSON");
    assert_eq!(parsed["data"], serde_json::json!({}));
}

#[test]
fn test_logger_formatter_is_the_fallback() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let logger = Logger::builder()
        .formatter(TimestampedFormatter::new())
        .transport(CallbackTransport::new(move |_entry, line| {
            sink.lock().unwrap().push(line.to_string());
            Ok(())
        }))
        .build();

    logger.info("stamped");
    let line = lines.lock().unwrap()[0].clone();
    assert!(line.starts_with('['));
    assert!(line.ends_with("] [INFO] stamped"));
}

struct FailingTransport {
    attempts: AtomicUsize,
}

#[async_trait]
impl Transport for FailingTransport {
    fn name(&self) -> &str {
        "FailingTransport"
    }

    fn write(&self, _entry: &LogEntry, _fallback: &dyn Formatter) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(LoggerError::other("Simulated failure"))
    }

    async fn flush(&self) -> Result<()> {
        Err(LoggerError::other("flush failed"))
    }

    async fn close(&self) -> Result<()> {
        Err(LoggerError::other("close failed"))
    }
}

#[test]
fn test_failing_transport_does_not_reach_caller() {
    let failing = Arc::new(FailingTransport {
        attempts: AtomicUsize::new(0),
    });
    let (logger, memory) = memory_logger(LogLevel::Info);
    logger.add_transport(failing.clone());

    for _ in 0..5 {
        logger.info("Test message");
    }

    assert_eq!(failing.attempts.load(Ordering::Relaxed), 5);
    assert_eq!(memory.len(), 5);
    assert_eq!(logger.metrics().write_failures(), 5);

    // 5 failed writes out of 5 entries * 2 transports
    let rate = logger.metrics().failure_rate(logger.transport_count());
    assert!((49.9..=50.1).contains(&rate), "Failure rate was {}", rate);
}

#[test]
fn test_transport_added_during_dispatch_waits_for_next_call() {
    let logger = Arc::new(Logger::new());
    let late = Arc::new(MemoryTransport::new().with_name("late"));

    let weak_logger = Arc::downgrade(&logger);
    let late_handle = Arc::clone(&late);
    let adder = CallbackTransport::new(move |_entry, _line| {
        if let Some(logger) = weak_logger.upgrade() {
            if logger.transport_count() == 1 {
                logger.add_transport(late_handle.clone());
            }
        }
        Ok(())
    });
    logger.add_transport(Arc::new(adder));

    logger.info("first");
    assert!(late.is_empty());

    logger.info("second");
    assert_eq!(late.len(), 1);
    assert_eq!(late.entries()[0].message, "second");
}

#[tokio::test]
async fn test_flush_and_close_report_failures_but_wait_for_all() {
    let done = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&done);
    let slow = CallbackTransport::builder()
        .name("slow")
        .async_callback(move |_entry, _line| {
            let counter = Arc::clone(&counter);
            async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<(), LoggerError>(())
            }
        })
        .build()
        .expect("callback is set");

    let logger = Logger::new();
    logger.add_transport(Arc::new(FailingTransport {
        attempts: AtomicUsize::new(0),
    }));
    logger.add_transport(Arc::new(slow));

    logger.info("one");
    logger.info("two");

    let err = logger.flush().await.unwrap_err();
    assert_eq!(done.load(Ordering::SeqCst), 2, "slow transport was awaited");
    assert_eq!(err.failures().len(), 1);
    assert_eq!(err.failures()[0].transport, "FailingTransport");

    let err = logger.close().await.unwrap_err();
    assert!(err.to_string().starts_with("close failed for 1 transport(s)"));
}

#[tokio::test]
async fn test_file_transport_through_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .level(LogLevel::Warn)
        .context("Disk")
        .transport(FileTransport::new(&log_file).expect("Failed to create transport"))
        .build();

    logger.info("Info message");
    logger.warn("Warn message");
    logger.error_with_exception(
        "Error message",
        ErrorInfo::new("IoError", "permission denied"),
        LogOptions::new(),
    );

    logger.close().await.expect("Failed to close");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(
        content,
        "[WARN] [Disk] Warn message\n[ERROR] [Disk] Error message\npermission denied\n"
    );
}

#[tokio::test]
async fn test_file_transport_json_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.jsonl");

    let logger = Logger::builder()
        .transport(
            FileTransport::new(&log_file)
                .expect("Failed to create transport")
                .with_formatter(JsonFormatter),
        )
        .build();

    for i in 0..5 {
        logger.info_with("Iteration", LogOptions::new().field("i", i));
    }
    logger.flush().await.expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);

    // Each line should be valid JSON
    for (i, line) in lines.into_iter().enumerate() {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["data"]["i"], i);
    }
}
