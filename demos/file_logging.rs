//! File logging example
//!
//! Writes the same records to a plain-text file and a JSON-lines file.
//!
//! Run with: cargo run --example file_logging

use colorful_logger::prelude::*;
use colorful_logger::{error, warn};

fn main() -> Result<()> {
    println!("=== Colorful Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir();
    let text_path = dir.join("colorful_logger_demo.log");
    let json_path = dir.join("colorful_logger_demo.jsonl");

    let json_sink = Sink::new(
        FileAppender::new(&json_path)?,
        FormatterConfig::new(RenderMode::FileJson).with_time_spec(TimeSpec::Microseconds),
    );

    let logger = Logger::builder()
        .name("billing")
        .file(&text_path)
        .sink(json_sink)
        .build()?;

    warn!(logger, "retrying charge"; attempt = 2, order_id = "A-1001");
    error!(logger, "charge failed"; error = "card declined", amount = 19.99);
    logger.shutdown();

    println!("Text log: {}", text_path.display());
    println!("{}", std::fs::read_to_string(&text_path)?);
    println!("JSON log: {}", json_path.display());
    println!("{}", std::fs::read_to_string(&json_path)?);

    println!("=== Example completed successfully! ===");
    Ok(())
}
