//! Declarative logger configuration
//!
//! [`LoggerConfig`] is the resolved settings a CLI or config file hands to the
//! logger. It deserializes with `serde`; every field has a default.

use super::error::Result;
use super::logger::{FileFormat, Logger, LoggerBuilder, ROOT_LOGGER_NAME};
use super::severity::Severity;
use super::timestamp::TimeSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: String,
    pub level: Severity,
    /// Display logs in the terminal
    pub console: bool,
    pub file_path: Option<PathBuf>,
    pub file_format: FileFormat,
    pub add_caller_path: bool,
    pub disable_line_number_filter: bool,
    pub asynchronous: bool,
    pub time_spec: TimeSpec,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            level: Severity::Warning,
            console: true,
            file_path: None,
            file_format: FileFormat::Text,
            add_caller_path: true,
            disable_line_number_filter: false,
            asynchronous: true,
            time_spec: TimeSpec::Milliseconds,
        }
    }
}

impl LoggerConfig {
    pub fn to_builder(&self) -> LoggerBuilder {
        let builder = Logger::builder()
            .name(self.name.clone())
            .min_level(self.level)
            .console(self.console)
            .file_format(self.file_format)
            .add_caller_path(self.add_caller_path)
            .disable_line_number_filter(self.disable_line_number_filter)
            .asynchronous(self.asynchronous)
            .time_spec(self.time_spec);

        match &self.file_path {
            Some(path) => builder.file(path.clone()),
            None => builder,
        }
    }
}

impl Logger {
    /// Build a logger from resolved configuration
    ///
    /// # Example
    /// ```
    /// use colorful_logger::{Logger, LoggerConfig, Severity};
    ///
    /// let config: LoggerConfig = serde_json::from_str(r#"{"level": "debug"}"#)?;
    /// let logger = Logger::from_config(&config)?;
    /// assert_eq!(logger.level(), Severity::Debug);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_config(config: &LoggerConfig) -> Result<Logger> {
        config.to_builder().build()
    }
}
