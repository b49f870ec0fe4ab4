//! Output destinations
//!
//! An [`Appender`] writes already rendered lines; a [`Sink`] pairs one with the
//! [`Formatter`] that renders records for it.

use super::error::Result;
use super::formatter::{Formatter, FormatterConfig};
use super::metrics::LoggerMetrics;
use super::record::Record;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub trait Appender: Send + Sync {
    /// Write one rendered line; the appender adds the line terminator
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

pub struct Sink {
    appender: Box<dyn Appender>,
    formatter: Formatter,
}

impl Sink {
    pub fn new(appender: impl Appender + 'static, config: FormatterConfig) -> Self {
        Self::boxed(Box::new(appender), config)
    }

    pub fn boxed(appender: Box<dyn Appender>, config: FormatterConfig) -> Self {
        Self {
            appender,
            formatter: Formatter::new(config),
        }
    }

    pub fn name(&self) -> &str {
        self.appender.name()
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Render the record for this sink and write it
    pub fn emit(&mut self, record: &Record) -> Result<()> {
        let line = self.formatter.render(record)?;
        self.appender.append(&line)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.appender.flush()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("appender", &self.appender.name())
            .field("formatter", &self.formatter)
            .finish()
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Write a record to every sink in registration order
///
/// A failing or panicking sink is reported and skipped; the remaining sinks
/// still receive the record.
pub(crate) fn deliver(sinks: &mut [Sink], record: &Record, metrics: &LoggerMetrics) {
    let mut has_error = false;

    for (idx, sink) in sinks.iter_mut().enumerate() {
        match catch_unwind(AssertUnwindSafe(|| sink.emit(record))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink #{} ({}) failed: {}", idx, sink.name(), e);
                metrics.record_sink_failure();
                has_error = true;
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Sink #{} ({}) panicked: {}. \
                     Other sinks continue to function.",
                    idx,
                    sink.name(),
                    panic_message(panic_info.as_ref())
                );
                metrics.record_sink_failure();
                has_error = true;
            }
        }
    }

    if has_error {
        metrics.record_dropped();
    } else {
        metrics.record_logged();
    }
}

pub(crate) fn flush_all(sinks: &mut [Sink]) {
    for (idx, sink) in sinks.iter_mut().enumerate() {
        match catch_unwind(AssertUnwindSafe(|| sink.flush())) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink #{} ({}) flush failed: {}", idx, sink.name(), e);
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Sink #{} ({}) panicked during flush: {}",
                    idx,
                    sink.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }
}
