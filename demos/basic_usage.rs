//! Basic logger usage example
//!
//! Demonstrates level filtering, child loggers, per-call data and the three
//! built-in formatters.
//!
//! Run with: cargo run --example basic_usage

use rust_fanout_logger::prelude::*;
use rust_fanout_logger::{error, info};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Fan-out Logger - Basic Usage Example ===\n");

    let memory = Arc::new(MemoryTransport::new());
    let logger = Logger::builder()
        .level(LogLevel::Info)
        .context("App")
        .transport(ConsoleTransport::new())
        .shared_transport(memory.clone())
        .build();

    println!("1. Logging at different levels (threshold INFO):");
    logger.error("This is an error message");
    logger.warn("This is a warning message");
    logger.info("This is an info message");
    logger.debug("Debug message (hidden)");
    logger.trace("Trace message (hidden)");

    println!("\n2. Child loggers share transports:");
    let db = logger.child("Db")?;
    db.info_with(
        "Connected",
        LogOptions::new().field("host", "localhost").field("port", 5432),
    );

    println!("\n3. Logging macros:");
    let retries = 3;
    info!(logger, "Retrying in {} seconds", retries);
    error!(db, "Query failed after {} attempts", retries);

    println!("\n4. JSON output on its own transport:");
    logger.add_transport(Arc::new(
        ConsoleTransport::new()
            .with_formatter(JsonFormatter)
            .with_name("json"),
    ));
    logger.error_with_exception(
        "Payment failed",
        ErrorInfo::new("Timeout", "gateway did not answer"),
        LogOptions::new().field("order_id", 1234),
    );
    logger.remove_transport("json");

    logger.flush().await?;
    println!("\nMemory transport captured {} entries", memory.len());
    println!(
        "Transport write failure rate: {:.1}%",
        logger.metrics().failure_rate(logger.transport_count())
    );

    logger.close().await?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
