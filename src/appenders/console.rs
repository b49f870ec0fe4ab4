//! Console appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes each line to the process's stdout or stderr
pub struct ConsoleAppender {
    target: ConsoleTarget,
}

impl ConsoleAppender {
    /// Standard error, the conventional stream for diagnostics
    pub fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
        }
    }

    pub fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let written = match self.target {
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
        written.map_err(|e| LoggerError::sink_write(self.name(), e))
    }

    fn flush(&mut self) -> Result<()> {
        let flushed = match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush(),
            ConsoleTarget::Stderr => std::io::stderr().flush(),
        };
        flushed.map_err(|e| LoggerError::sink_write(self.name(), e))
    }

    fn name(&self) -> &str {
        "console"
    }
}
