//! Logger facade

use super::{
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    fields::Fields,
    formatter::{FormatterConfig, RenderMode},
    metrics::LoggerMetrics,
    record::Record,
    severity::Severity,
    sink::{deliver, flush_all, Sink},
    timestamp::{TimeLayout, TimeSpec},
};
use crate::appenders::{ConsoleAppender, FileAppender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Exit status used by [`Logger::fatal`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// Called by [`Logger::fatal`] after the flush; defaults to `std::process::exit`
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

/// Name given to loggers built without one
pub const ROOT_LOGGER_NAME: &str = "root";

/// How a file sink renders records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Text,
    /// Console layout with colors, for files read with `less -R` or `tail`
    Colored,
    Json,
}

impl FileFormat {
    fn render_mode(self) -> RenderMode {
        match self {
            FileFormat::Text => RenderMode::FileText,
            FileFormat::Colored => RenderMode::Console,
            FileFormat::Json => RenderMode::FileJson,
        }
    }
}

#[derive(Clone)]
enum Output {
    /// Records go through the shared dispatcher's worker
    Queued(Arc<Dispatcher>),
    /// Records are written on the caller's thread
    Direct {
        sinks: Arc<Mutex<Vec<Sink>>>,
        metrics: Arc<LoggerMetrics>,
    },
}

pub struct Logger {
    name: String,
    min_level: AtomicU8,
    output: Output,
    exit_hook: ExitHook,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use colorful_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("api")
    ///     .min_level(Severity::Debug)
    ///     .build()?;
    /// logger.info("listening");
    /// # Ok::<(), colorful_logger::LoggerError>(())
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Severity {
        Severity::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    /// Change this logger's minimum level; children keep their own copy
    pub fn set_level(&self, level: Severity) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    #[inline]
    pub fn enabled(&self, level: Severity) -> bool {
        level as u8 >= self.min_level.load(Ordering::Relaxed)
    }

    /// `true` when records are delivered by a background worker
    pub fn is_async(&self) -> bool {
        matches!(self.output, Output::Queued(_))
    }

    pub fn dispatcher(&self) -> Option<&Arc<Dispatcher>> {
        match &self.output {
            Output::Queued(dispatcher) => Some(dispatcher),
            Output::Direct { .. } => None,
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        match &self.output {
            Output::Queued(dispatcher) => dispatcher.metrics(),
            Output::Direct { metrics, .. } => metrics,
        }
    }

    /// New logger named `name` sharing this logger's sinks and exit hook
    ///
    /// The level is copied: changing the parent's level later does not
    /// affect the child. Stopping the shared dispatcher stops delivery for
    /// every logger attached to it.
    pub fn child(&self, name: impl Into<String>) -> Logger {
        Logger {
            name: name.into(),
            min_level: AtomicU8::new(self.min_level.load(Ordering::Relaxed)),
            output: self.output.clone(),
            exit_hook: Arc::clone(&self.exit_hook),
        }
    }

    #[track_caller]
    pub fn log(&self, level: Severity, message: impl Into<String>, fields: Fields) {
        if !self.enabled(level) {
            return;
        }

        let record = Record::new(level, &self.name, message.into(), fields);
        self.emit(record);
    }

    fn emit(&self, record: Record) {
        match &self.output {
            Output::Queued(dispatcher) => dispatcher.enqueue(record),
            Output::Direct { sinks, metrics } => deliver(&mut sinks.lock(), &record, metrics),
        }
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Severity::Trace, message, Fields::new());
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message, Fields::new());
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message, Fields::new());
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warning, message, Fields::new());
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message, Fields::new());
    }

    /// Log at FATAL, flush every sink, then run the exit hook
    ///
    /// FATAL is the highest level and always passes the gate. The record is
    /// written even when the shared dispatcher is draining or stopped. With
    /// the default hook this call does not return.
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>, fields: Fields) {
        let record = Record::new(Severity::Fatal, &self.name, message.into(), fields);
        match &self.output {
            Output::Queued(dispatcher) => dispatcher.enqueue_or_write(record),
            Output::Direct { .. } => self.emit(record),
        }
        self.flush();
        (self.exit_hook)(FATAL_EXIT_CODE);
    }

    /// Block until every record logged so far has been written and flushed
    pub fn flush(&self) {
        match &self.output {
            Output::Queued(dispatcher) => dispatcher.flush(),
            Output::Direct { sinks, .. } => flush_all(&mut sinks.lock()),
        }
    }

    /// Drain and stop the shared dispatcher; only flushes in synchronous mode
    pub fn shutdown(&self) {
        match &self.output {
            Output::Queued(dispatcher) => dispatcher.stop(),
            Output::Direct { sinks, .. } => flush_all(&mut sinks.lock()),
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("async", &self.is_async())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Sinks are registered in this order: console, file, then custom sinks.
///
/// # Example
/// ```no_run
/// use colorful_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .name("worker")
///     .min_level(Severity::Debug)
///     .file("/var/log/worker.jsonl")
///     .file_format(FileFormat::Json)
///     .build()?;
/// # Ok::<(), colorful_logger::LoggerError>(())
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: Severity,
    console: bool,
    file_path: Option<PathBuf>,
    file_format: FileFormat,
    file_append: bool,
    add_caller_path: bool,
    disable_line_number_filter: bool,
    time_spec: TimeSpec,
    asynchronous: bool,
    sinks: Vec<Sink>,
    exit_hook: Option<ExitHook>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            min_level: Severity::Warning,
            console: true,
            file_path: None,
            file_format: FileFormat::Text,
            file_append: false,
            add_caller_path: true,
            disable_line_number_filter: false,
            time_spec: TimeSpec::Milliseconds,
            asynchronous: true,
            sinks: Vec::new(),
            exit_hook: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: Severity) -> Self {
        self.min_level = level;
        self
    }

    /// Write colorized lines to stderr (on by default)
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Also write to the file at `path`, truncating it on open
    #[must_use = "builder methods return a new value"]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_format(mut self, format: FileFormat) -> Self {
        self.file_format = format;
        self
    }

    /// Keep existing file content instead of truncating
    #[must_use = "builder methods return a new value"]
    pub fn file_append(mut self, append: bool) -> Self {
        self.file_append = append;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_caller_path(mut self, add: bool) -> Self {
        self.add_caller_path = add;
        self
    }

    /// Show the caller location on INFO and WARNING console lines too
    #[must_use = "builder methods return a new value"]
    pub fn disable_line_number_filter(mut self, disable: bool) -> Self {
        self.disable_line_number_filter = disable;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_spec(mut self, spec: TimeSpec) -> Self {
        self.time_spec = spec;
        self
    }

    /// Deliver through a background worker (on by default)
    #[must_use = "builder methods return a new value"]
    pub fn asynchronous(mut self, enabled: bool) -> Self {
        self.asynchronous = enabled;
        self
    }

    /// Register a custom sink after the console and file sinks
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = Some(hook);
        self
    }

    fn formatter_config(&self, mode: RenderMode, time_layout: TimeLayout) -> FormatterConfig {
        let config = FormatterConfig::new(mode)
            .with_add_caller_path(self.add_caller_path)
            .with_time_layout(time_layout)
            .with_time_spec(self.time_spec);
        if self.disable_line_number_filter {
            config.without_line_number_filter()
        } else {
            config
        }
    }

    /// Build the Logger
    ///
    /// Fails when no destination is configured or the file cannot be opened.
    pub fn build(self) -> Result<Logger> {
        if !self.console && self.file_path.is_none() && self.sinks.is_empty() {
            return Err(LoggerError::config(
                "LoggerBuilder",
                "the log must be displayed in the terminal or saved to a file",
            ));
        }

        let mut sinks = Vec::with_capacity(2 + self.sinks.len());
        if self.console {
            sinks.push(Sink::new(
                ConsoleAppender::stderr(),
                self.formatter_config(RenderMode::Console, TimeLayout::TimeOnly),
            ));
        }
        if let Some(path) = &self.file_path {
            let appender = if self.file_append {
                FileAppender::append_to(path)?
            } else {
                FileAppender::new(path)?
            };
            sinks.push(Sink::new(
                appender,
                self.formatter_config(self.file_format.render_mode(), TimeLayout::DateTime),
            ));
        }

        let LoggerBuilder {
            name,
            min_level,
            asynchronous,
            sinks: custom_sinks,
            exit_hook,
            ..
        } = self;
        sinks.extend(custom_sinks);

        let output = if asynchronous {
            let dispatcher = Arc::new(Dispatcher::new(sinks));
            dispatcher.start()?;
            Output::Queued(dispatcher)
        } else {
            Output::Direct {
                sinks: Arc::new(Mutex::new(sinks)),
                metrics: Arc::new(LoggerMetrics::new()),
            }
        };

        Ok(Logger {
            name,
            min_level: AtomicU8::new(min_level as u8),
            output,
            exit_hook: exit_hook.unwrap_or_else(|| Arc::new(|code| std::process::exit(code))),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
