//! Log record structure

use super::fields::Fields;
use super::severity::Severity;
use chrono::{DateTime, Local};
use std::panic::Location;

/// One structured log event captured at a call site
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Severity,
    pub timestamp: DateTime<Local>,
    pub logger_name: String,
    pub message: String,
    pub fields: Fields,
    pub caller_file: String,
    pub caller_line: u32,
}

/// Escape newlines, carriage returns and tabs to prevent log injection
///
/// Applied to every free-form text segment so that one record always
/// renders as one line.
pub(crate) fn escape_control(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

impl Record {
    /// Build a record stamped with the current time and the caller's location
    #[track_caller]
    pub fn new(level: Severity, logger_name: &str, message: String, fields: Fields) -> Self {
        let location = Location::caller();
        Self {
            level,
            timestamp: Local::now(),
            logger_name: logger_name.to_string(),
            message: escape_control(&message),
            fields,
            caller_file: location.file().to_string(),
            caller_line: location.line(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_location(mut self, file: &str, line: u32) -> Self {
        self.caller_file = file.to_string();
        self.caller_line = line;
        self
    }

    /// `true` when the logger name should not be rendered
    pub fn is_root(&self) -> bool {
        self.logger_name.is_empty() || self.logger_name == "root"
    }
}
