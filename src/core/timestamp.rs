//! Timestamp rendering
//!
//! Two canonical layouts (date + time, time only) combined with a precision
//! policy for the sub-second part.

use super::error::LoggerError;
use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which calendar parts are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeLayout {
    /// `2025-01-08 10:30:45.123`
    #[default]
    DateTime,
    /// `10:30:45.123`
    TimeOnly,
}

impl TimeLayout {
    fn pattern(&self) -> &'static str {
        match self {
            TimeLayout::DateTime => "%Y-%m-%d %H:%M:%S",
            TimeLayout::TimeOnly => "%H:%M:%S",
        }
    }
}

/// Precision of the sub-second part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeSpec {
    /// Milliseconds, omitted entirely when the microsecond value is zero
    Auto,
    Seconds,
    #[default]
    Milliseconds,
    Microseconds,
}

impl TimeSpec {
    pub fn to_str(&self) -> &'static str {
        match self {
            TimeSpec::Auto => "auto",
            TimeSpec::Seconds => "seconds",
            TimeSpec::Milliseconds => "milliseconds",
            TimeSpec::Microseconds => "microseconds",
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for TimeSpec {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(TimeSpec::Auto),
            "seconds" => Ok(TimeSpec::Seconds),
            "milliseconds" => Ok(TimeSpec::Milliseconds),
            "microseconds" => Ok(TimeSpec::Microseconds),
            _ => Err(LoggerError::invalid_time_spec(s)),
        }
    }
}

impl TryFrom<String> for TimeSpec {
    type Error = LoggerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSpec> for String {
    fn from(spec: TimeSpec) -> Self {
        spec.to_str().to_string()
    }
}

/// Render `datetime` with the given layout and precision
///
/// Milliseconds are the microsecond value divided by 1000, truncated.
pub fn format_time<Tz>(datetime: &DateTime<Tz>, layout: TimeLayout, spec: TimeSpec) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let base = datetime.format(layout.pattern()).to_string();
    // Leap seconds report nanos >= 1e9; clamp them into the last microsecond.
    let micros = (datetime.nanosecond() / 1_000).min(999_999);

    match spec {
        TimeSpec::Seconds => base,
        TimeSpec::Auto if micros == 0 => base,
        TimeSpec::Auto | TimeSpec::Milliseconds => format!("{}.{:03}", base, micros / 1_000),
        TimeSpec::Microseconds => format!("{}.{:06}", base, micros),
    }
}
