//! Log severity definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[derive(Default)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    #[default]
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Three-letter tag used in text output
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Trace => "TRC",
            Severity::Debug => "DEB",
            Severity::Info => "INF",
            Severity::Warning => "WAR",
            Severity::Error => "ERR",
            Severity::Fatal => "FAT",
        }
    }

    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Trace => Blue,
            Severity::Debug => Magenta,
            Severity::Info => Green,
            Severity::Warning => Yellow,
            Severity::Error => BrightRed,
            Severity::Fatal => Red,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Debug,
            2 => Severity::Info,
            3 => Severity::Warning,
            4 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" | "TRC" => Ok(Severity::Trace),
            "DEBUG" | "DEB" => Ok(Severity::Debug),
            "INFO" | "INF" => Ok(Severity::Info),
            "WARN" | "WARNING" | "WAR" => Ok(Severity::Warning),
            "ERROR" | "ERR" => Ok(Severity::Error),
            "FATAL" | "FAT" | "CRITICAL" => Ok(Severity::Fatal),
            _ => Err(LoggerError::unknown_level(s)),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, LoggerError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(level: Severity) -> Self {
        level.to_str().to_string()
    }
}
