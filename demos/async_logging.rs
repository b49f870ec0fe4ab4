//! Asynchronous logging example
//!
//! Several threads log through one dispatcher; a single worker writes every
//! record in the order it was enqueued.
//!
//! Run with: cargo run --example async_logging

use colorful_logger::prelude::*;
use colorful_logger::info;
use std::thread;

fn main() -> Result<()> {
    println!("=== Colorful Logger - Async Logging Example ===\n");

    let logger = Logger::builder()
        .name("workers")
        .min_level(Severity::Info)
        .build()?;

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = logger.child(format!("worker-{}", worker));
            thread::spawn(move || {
                for job in 0..5 {
                    info!(logger, "job done"; job = job);
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    if let Some(dispatcher) = logger.dispatcher() {
        let drained = dispatcher.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
        println!("\nDispatcher drained: {}", drained);
    }

    let metrics = logger.metrics();
    println!("Records written: {}", metrics.total_logged());
    println!("Records dropped: {}", metrics.dropped_count());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
