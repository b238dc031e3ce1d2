//! Built-in transports
//!
//! Console and file transports follow the global output format unless they
//! were created with an explicit override.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use console::Term;

use crate::entry::LogEntry;
use crate::error::Result;
use crate::format::{format_data, format_json, format_pretty};
use crate::settings::{self, OutputFormat};
use crate::traits::Transport;

/// Render an entry as the single line a transport writes
pub fn render_line(entry: &LogEntry, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(entry),
        OutputFormat::Pretty => {
            let output = format_pretty(entry);
            let data = format_data(entry.data.as_ref());
            if data.is_empty() {
                Ok(output)
            } else {
                Ok(format!("{output} {data}"))
            }
        }
    }
}

fn effective_format(format: Option<OutputFormat>) -> OutputFormat {
    format.unwrap_or_else(|| settings::config().format)
}

/// Writes entries to the terminal
///
/// Warnings and errors go to stderr, everything else to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleTransport {
    format: Option<OutputFormat>,
}

impl ConsoleTransport {
    /// Create a console transport following the global format
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a console transport that always uses `format`
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            format: Some(format),
        }
    }
}

impl Transport for ConsoleTransport {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = render_line(entry, effective_format(self.format))?;
        let term = if entry.level.is_problem() {
            Term::stderr()
        } else {
            Term::stdout()
        };
        term.write_line(&line)?;
        Ok(())
    }
}

/// Appends entries to a file, one line each
#[derive(Debug, Clone)]
pub struct FileTransport {
    path: PathBuf,
    format: Option<OutputFormat>,
}

impl FileTransport {
    /// Create a file transport following the global format
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }

    /// Force an output format for this file
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for FileTransport {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut line = render_line(entry, effective_format(self.format))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Keeps rendered lines in memory
///
/// Clones share the same buffer, so a clone can be installed as a transport
/// while the original is used to inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    format: OutputFormat,
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryTransport {
    /// Create an empty in-memory transport using pretty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty in-memory transport using `format`
    pub fn with_format(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop everything written so far
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Transport for MemoryTransport {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let line = render_line(entry, self.format)?;
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
        Ok(())
    }
}
