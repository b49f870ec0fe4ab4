//! Core logger types and traits

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod severity;
pub mod sink;
pub mod timestamp;

pub use config::LoggerConfig;
pub use dispatcher::{Dispatcher, DispatcherState, DEFAULT_SHUTDOWN_TIMEOUT};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::{Formatter, FormatterConfig, RenderMode, CONNECTOR};
pub use logger::{ExitHook, FileFormat, Logger, LoggerBuilder, FATAL_EXIT_CODE, ROOT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use record::Record;
pub use severity::Severity;
pub use sink::{Appender, Sink};
pub use timestamp::{format_time, TimeLayout, TimeSpec};
