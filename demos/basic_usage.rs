//! Basic logger usage example
//!
//! Demonstrates the colorized console output at every level and the caller
//! suppression for INFO and WARNING lines.
//!
//! Run with: cargo run --example basic_usage

use colorful_logger::prelude::*;
use colorful_logger::{debug, error, info, trace, warn};

fn main() -> Result<()> {
    println!("=== Colorful Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .min_level(Severity::Trace)
        .asynchronous(false)
        .build()?;

    println!("1. Logging at different levels:");
    trace!(logger, "This is a trace message");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message"; err = "connection reset");

    println!("\n2. Structured fields:");
    info!(logger, "user created"; user_id = 42, name = "Tommy", admin = false);

    println!("\n3. Raising the minimum level to ERROR:");
    logger.set_level(Severity::Error);
    info!(logger, "Info message (hidden)");
    error!(logger, "Error message (visible)");

    println!("\n4. Child logger:");
    let db = logger.child("db");
    error!(db, "query failed"; table = "users", elapsed_ms = 1530);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
