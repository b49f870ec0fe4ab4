//! # Colorful Logger
//!
//! Structured, leveled logging with colorized console output, plain-text and
//! JSON-lines files, and an asynchronous single-consumer dispatcher.
//!
//! ## Features
//!
//! - **Colorized Console**: Fixed per-level colors with three-letter tags
//! - **Structured Fields**: Ordered key/value pairs rendered as `k=v` or JSON
//! - **Asynchronous Delivery**: One background worker preserves FIFO order
//! - **Fatal Handling**: Flush every sink before the process exits
//!
//! ## Example
//!
//! ```
//! use colorful_logger::prelude::*;
//! use colorful_logger::info;
//!
//! let logger = Logger::builder().min_level(Severity::Info).build()?;
//! info!(logger, "server started"; port = 8080, tls = false);
//! logger.shutdown();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleTarget, FileAppender};
    pub use crate::core::{
        Appender, Dispatcher, DispatcherState, FieldValue, Fields, FileFormat, Formatter,
        FormatterConfig, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Record,
        RenderMode, Result, Severity, Sink, TimeLayout, TimeSpec, DEFAULT_SHUTDOWN_TIMEOUT,
    };
}

pub use appenders::{ConsoleAppender, ConsoleTarget, FileAppender};
pub use core::{
    Appender, Dispatcher, DispatcherState, ExitHook, FieldValue, Fields, FileFormat, Formatter,
    FormatterConfig, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Record,
    RenderMode, Result, Severity, Sink, TimeLayout, TimeSpec, DEFAULT_SHUTDOWN_TIMEOUT,
    FATAL_EXIT_CODE,
};
