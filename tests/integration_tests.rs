//! Integration tests for the logging pipeline
//!
//! These tests verify:
//! - Text and JSON file output end to end
//! - Caller suppression for routine console levels
//! - Log injection prevention
//! - Multiple sinks, child loggers and dispatcher restart
//! - Construction from declarative configuration

use colorful_logger::prelude::*;
use colorful_logger::{error, info, warn};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Remove ANSI SGR sequences so assertions hold with or without a terminal
fn strip_ansi(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(str::to_string)
        .collect()
}

fn file_logger(path: &Path, format: FileFormat) -> Logger {
    Logger::builder()
        .name("app")
        .console(false)
        .file(path)
        .file_format(format)
        .min_level(Severity::Trace)
        .build()
        .expect("Failed to build logger")
}

#[test]
fn test_file_text_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let logger = file_logger(&log_file, FileFormat::Text);

    let line = line!() + 1;
    info!(logger, "user created"; id = 42, name = "Tommy");
    logger.shutdown();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);

    let text = &lines[0];
    let (date, rest) = text.split_at(10);
    assert_eq!(date.len(), 10);
    assert_eq!(date.as_bytes()[4], b'-');
    assert!(rest.starts_with(' '));
    assert!(text.contains(" [INF] app "));
    assert!(text.contains(&format!("integration_tests.rs:{} - ", line)));
    assert!(text.ends_with("- user created id=42 name=Tommy"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn test_file_json_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.jsonl");
    let logger = file_logger(&log_file, FileFormat::Json);

    logger.log(
        Severity::Error,
        "payment failed",
        Fields::new()
            .with_field("order_id", 1234)
            .with_field("amount", 9.5)
            .with_field("level", "gold"),
    );
    logger.shutdown();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(&lines[0]).expect("Invalid JSON");
    let object = value.as_object().expect("Expected an object");

    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["level", "time", "message", "order-id", "amount", "field-level", "caller"]
    );
    assert_eq!(object["level"], "ERROR");
    assert_eq!(object["message"], "payment failed");
    assert_eq!(object["order-id"], 1234);
    assert_eq!(object["amount"], 9.5);
    assert_eq!(object["field-level"], "gold");
    assert!(object["caller"]
        .as_str()
        .unwrap()
        .contains("integration_tests.rs:"));
}

#[test]
fn test_console_layout_suppresses_routine_callers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("colored.log");
    let logger = file_logger(&log_file, FileFormat::Colored);

    info!(logger, "routine");
    warn!(logger, "careful");
    error!(logger, "broken"; err = "timeout");
    logger.shutdown();

    let raw = read_lines(&log_file);
    assert!(raw.iter().all(|l| l.contains("\x1b[")));
    assert!(raw[2].contains("\x1b[91mERR\x1b[0m"));

    let lines: Vec<String> = raw.iter().map(|l| strip_ansi(l)).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("[INF] app - routine"));
    assert!(lines[1].ends_with("[WAR] app - careful"));
    assert!(lines[2].contains("[ERR] app "));
    assert!(lines[2].contains("integration_tests.rs:"));
    assert!(lines[2].ends_with("- broken err=timeout"));
}

#[test]
fn test_disabled_line_number_filter_keeps_callers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("colored.log");
    let logger = Logger::builder()
        .console(false)
        .file(&log_file)
        .file_format(FileFormat::Colored)
        .min_level(Severity::Info)
        .disable_line_number_filter(true)
        .build()
        .unwrap();

    logger.info("routine");
    logger.shutdown();

    let line = strip_ansi(&read_lines(&log_file)[0]);
    assert!(line.contains("[INF] "));
    assert!(line.contains("integration_tests.rs:"));
}

#[test]
fn test_root_name_omitted_and_short_caller() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("root.log");
    let logger = Logger::builder()
        .console(false)
        .file(&log_file)
        .add_caller_path(false)
        .build()
        .unwrap();

    logger.warn("disk almost full");
    logger.shutdown();

    let line = &read_lines(&log_file)[0];
    assert!(line.contains(" [WAR] integration_tests.rs:"));
    assert!(!line.contains("tests/integration_tests.rs"));
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");
    let logger = file_logger(&log_file, FileFormat::Text);

    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\r\tINFO Continuation";
    logger.info(malicious_message);
    logger.shutdown();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));
    assert!(content.contains("\\r\\t"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_multiple_sinks_receive_every_record() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let text_file = temp_dir.path().join("app.log");
    let json_file = temp_dir.path().join("app.jsonl");

    let json_sink = Sink::new(
        FileAppender::new(&json_file).unwrap(),
        FormatterConfig::new(RenderMode::FileJson),
    );
    let logger = Logger::builder()
        .console(false)
        .file(&text_file)
        .min_level(Severity::Debug)
        .sink(json_sink)
        .build()
        .unwrap();

    for i in 0..20 {
        logger.debug(format!("message {}", i));
    }
    logger.shutdown();

    let text_lines = read_lines(&text_file);
    let json_lines = read_lines(&json_file);
    assert_eq!(text_lines.len(), 20);
    assert_eq!(json_lines.len(), 20);
    assert!(text_lines[19].ends_with("- message 19"));
    let last: serde_json::Value = serde_json::from_str(&json_lines[19]).unwrap();
    assert_eq!(last["message"], "message 19");
    assert_eq!(logger.metrics().total_logged(), 20);
}

#[test]
fn test_child_logger_writes_to_parent_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let parent = file_logger(&log_file, FileFormat::Text);
    let child = parent.child("app.db");

    parent.error("parent line");
    child.error("child line");
    parent.shutdown();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[ERR] app "));
    assert!(lines[1].contains("[ERR] app.db "));
}

#[test]
fn test_dispatcher_restart_keeps_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("restart.log");
    let logger = file_logger(&log_file, FileFormat::Text);
    let dispatcher = logger.dispatcher().expect("asynchronous by default");

    logger.error("first run");
    dispatcher.stop();
    assert_eq!(dispatcher.state(), DispatcherState::Stopped);

    logger.error("while stopped");
    dispatcher.start().unwrap();
    logger.error("second run");
    logger.shutdown();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("- first run"));
    assert!(lines[1].ends_with("- second run"));
    assert_eq!(logger.metrics().dropped_count(), 1);
}

#[test]
fn test_failing_sink_does_not_block_file() {
    struct Broken;

    impl Appender for Broken {
        fn append(&mut self, _line: &str) -> Result<()> {
            Err(LoggerError::sink_write(
                "broken",
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
            ))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let logger = Logger::builder()
        .console(false)
        .sink(Sink::new(Broken, FormatterConfig::new(RenderMode::FileText)))
        .file(&log_file)
        .build()
        .unwrap();

    logger.error("still written");
    logger.shutdown();

    assert_eq!(read_lines(&log_file).len(), 1);
    assert_eq!(logger.metrics().sink_failures(), 1);
}

#[test]
fn test_logger_from_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.jsonl");

    let document = serde_json::json!({
        "name": "svc",
        "level": "debug",
        "console": false,
        "file_path": log_file,
        "file_format": "json",
        "asynchronous": false,
        "time_spec": "seconds"
    });
    let config: LoggerConfig = serde_json::from_value(document).unwrap();
    let logger = Logger::from_config(&config).unwrap();

    logger.trace("filtered");
    logger.debug("kept");
    logger.flush();

    let lines = read_lines(&log_file);
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["level"], "DEBUG");
    // seconds precision: "YYYY-MM-DD HH:MM:SS"
    assert_eq!(value["time"].as_str().unwrap().len(), 19);
}

#[test]
fn test_unopenable_file_fails_construction() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("missing").join("app.log");

    let err = Logger::builder().file(&log_file).build().unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}
