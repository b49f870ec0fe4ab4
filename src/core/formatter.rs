//! Record rendering
//!
//! A [`Formatter`] turns a [`Record`] into one line of output:
//! - `Console`: colorized text for terminals
//! - `FileText`: the same layout without colors
//! - `FileJson`: one compact JSON object per record

use super::error::Result;
use super::fields::FieldValue;
use super::record::{escape_control, Record};
use super::severity::Severity;
use super::timestamp::{format_time, TimeLayout, TimeSpec};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Separator between the record header and its message
pub const CONNECTOR: &str = "-";

const RESERVED_JSON_KEYS: [&str; 4] = ["level", "time", "message", "caller"];

/// Output policy of a formatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Colorized text (example: `10:30:45.123 [INF] db - connected host=a`)
    #[default]
    Console,
    /// Plain text with the console layout
    FileText,
    /// JSON object per line (example: `{"level":"INFO","time":"...","message":"connected","caller":"src/db.rs:12"}`)
    FileJson,
}

/// Colors of each text segment in console mode
struct Palette;

impl Palette {
    const BRACKET: Color = Color::White;
    const TIME: Color = Color::BrightBlack;
    const NAME: Color = Color::Cyan;
    const CONNECTOR: Color = Color::BrightCyan;
    const ERROR_KEY: Color = Color::Red;
    const KEY: Color = Color::Cyan;
}

/// Formatting options for one sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    pub mode: RenderMode,
    /// Render the caller path as captured; otherwise only its file name
    pub add_caller_path: bool,
    /// Levels whose caller segment is dropped in console mode
    pub suppress_line_number_for: BTreeSet<Severity>,
    pub time_layout: TimeLayout,
    pub time_spec: TimeSpec,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Console,
            add_caller_path: true,
            suppress_line_number_for: Self::default_suppressed_levels(),
            time_layout: TimeLayout::DateTime,
            time_spec: TimeSpec::Milliseconds,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// INFO and WARNING lines are routine; their location is noise
    pub fn default_suppressed_levels() -> BTreeSet<Severity> {
        [Severity::Info, Severity::Warning].into_iter().collect()
    }

    #[must_use]
    pub fn with_add_caller_path(mut self, add: bool) -> Self {
        self.add_caller_path = add;
        self
    }

    #[must_use]
    pub fn with_suppressed_levels(mut self, levels: impl IntoIterator<Item = Severity>) -> Self {
        self.suppress_line_number_for = levels.into_iter().collect();
        self
    }

    /// Keep the caller segment for every level
    #[must_use]
    pub fn without_line_number_filter(mut self) -> Self {
        self.suppress_line_number_for.clear();
        self
    }

    #[must_use]
    pub fn with_time_layout(mut self, layout: TimeLayout) -> Self {
        self.time_layout = layout;
        self
    }

    #[must_use]
    pub fn with_time_spec(mut self, spec: TimeSpec) -> Self {
        self.time_spec = spec;
        self
    }
}

/// Stateless renderer parameterized by a [`FormatterConfig`]
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: FormatterConfig,
}

impl Formatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Render a record as one line, without a line terminator
    pub fn render(&self, record: &Record) -> Result<String> {
        match self.config.mode {
            RenderMode::Console => Ok(self.render_text(record, true)),
            RenderMode::FileText => Ok(self.render_text(record, false)),
            RenderMode::FileJson => self.render_json(record),
        }
    }

    fn render_text(&self, record: &Record, colorize: bool) -> String {
        let paint = |text: String, color: Color| -> String {
            if colorize {
                sgr(&color.to_fg_str(), &text)
            } else {
                text
            }
        };

        let mut segments: Vec<String> = Vec::with_capacity(6 + record.fields.len());

        let time = format_time(
            &record.timestamp,
            self.config.time_layout,
            self.config.time_spec,
        );
        segments.push(paint(time, Palette::TIME));

        segments.push(format!(
            "{}{}{}",
            paint("[".to_string(), Palette::BRACKET),
            paint(record.level.tag().to_string(), record.level.color()),
            paint("]".to_string(), Palette::BRACKET),
        ));

        if !record.is_root() {
            segments.push(paint(escape_control(&record.logger_name), Palette::NAME));
        }

        let suppressed =
            colorize && self.config.suppress_line_number_for.contains(&record.level);
        if !suppressed {
            let caller = self.caller(record);
            segments.push(if colorize {
                sgr(BOLD, &caller)
            } else {
                caller
            });
        }

        segments.push(paint(CONNECTOR.to_string(), Palette::CONNECTOR));

        if !record.message.is_empty() {
            segments.push(record.message.clone());
        }

        for (key, value) in record.fields.iter() {
            let key_color = if is_error_key(key) {
                Palette::ERROR_KEY
            } else {
                Palette::KEY
            };
            segments.push(format!(
                "{}={}",
                paint(escape_control(key), key_color),
                text_value(value)
            ));
        }

        segments.join(" ")
    }

    fn render_json(&self, record: &Record) -> Result<String> {
        use serde_json::Value;

        let mut object = serde_json::Map::new();
        object.insert(
            "level".to_string(),
            Value::String(record.level.to_str().to_string()),
        );
        object.insert(
            "time".to_string(),
            Value::String(format_time(
                &record.timestamp,
                TimeLayout::DateTime,
                self.config.time_spec,
            )),
        );
        object.insert("message".to_string(), Value::String(record.message.clone()));

        for (key, value) in record.fields.iter() {
            let mut key = key.replace('_', "-");
            if RESERVED_JSON_KEYS.contains(&key.as_str()) {
                key = format!("field-{}", key);
            }
            object.insert(key, value.to_json_value());
        }

        object.insert(
            "caller".to_string(),
            Value::String(format!("{}:{}", record.caller_file, record.caller_line)),
        );

        Ok(serde_json::to_string(&Value::Object(object))?)
    }

    fn caller(&self, record: &Record) -> String {
        let path = if self.config.add_caller_path {
            record.caller_file.as_str()
        } else {
            Path::new(&record.caller_file)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(&record.caller_file)
        };
        format!("{}:{}", path, record.caller_line)
    }
}

const BOLD: &str = "1";

/// Wrap `text` in an ANSI SGR sequence
///
/// Written directly rather than through `colored::Colorize`, whose global
/// switch follows whether stdout is a terminal; a colorized file sink or a
/// stderr console must not depend on it.
fn sgr(code: &str, text: &str) -> String {
    format!("\x1b[{}m{}\x1b[0m", code, text)
}

fn is_error_key(key: &str) -> bool {
    key == "err" || key == "error"
}

/// Quote a text value when it would break `key=value` parsing
///
/// Control characters are escaped so a value can never start a new line.
fn text_value(value: &FieldValue) -> String {
    let rendered = value.to_string();
    let needs_quotes = matches!(value, FieldValue::String(_))
        && (rendered.is_empty()
            || rendered
                .chars()
                .any(|c| c.is_whitespace() || c == '"' || c == '='));
    if needs_quotes {
        let quoted = rendered.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escape_control(&quoted))
    } else {
        escape_control(&rendered)
    }
}
