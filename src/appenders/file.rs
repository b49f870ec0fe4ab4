//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileAppender {
    /// Create (or truncate) the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(path.into(), true)
    }

    /// Open the file at `path`, keeping existing content
    pub fn append_to(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(path.into(), false)
    }

    fn open(path: PathBuf, truncate: bool) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }

        let file = options.open(&path).map_err(|e| {
            LoggerError::config(
                "FileAppender",
                format!("cannot open '{}': {}", path.display(), e),
            )
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .map_err(|e| LoggerError::sink_write("file", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| LoggerError::sink_write("file", e))
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.flush();
    }
}
