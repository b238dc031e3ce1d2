//! Output streams and terminal control sequences
//!
//! Every visual element writes to a `TermStream`. The stream decides whether
//! cursor control is possible; on anything that is not an interactive
//! terminal the elements fall back to plain lines.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use console::Term;

/// Hide the terminal cursor
pub const HIDE_CURSOR: &str = "\x1b[?25l";

/// Show the terminal cursor
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Return to column zero and erase the line
pub const CLEAR_LINE: &str = "\r\x1b[K";

/// Move the cursor up one row and erase that row
pub const UP_AND_CLEAR: &str = "\x1b[1A\x1b[K";

/// Sequence erasing `lines` rows, ending on the topmost one
///
/// The current row is always cleared, so zero and one are equivalent.
pub fn clear_lines(lines: usize) -> String {
    let mut seq = String::from(CLEAR_LINE);
    for _ in 1..lines {
        seq.push_str(UP_AND_CLEAR);
    }
    seq
}

/// Number of terminal rows a rendered string occupies
pub fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// A writable stream that knows whether it is an interactive terminal
pub trait TermStream: Write + Send {
    /// Whether cursor control sequences are understood
    fn is_tty(&self) -> bool;
}

impl TermStream for Term {
    fn is_tty(&self) -> bool {
        self.is_term()
    }
}

/// Standard output
pub fn stdout() -> Box<dyn TermStream> {
    Box::new(Term::stdout())
}

/// Standard error
pub fn stderr() -> Box<dyn TermStream> {
    Box::new(Term::stderr())
}

/// In-memory stream for tests and redirection
///
/// Clones share the same buffer. The TTY flag is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream {
    buffer: Arc<Mutex<Vec<u8>>>,
    tty: bool,
}

impl MemoryStream {
    /// A stream that behaves like a pipe
    pub fn new() -> Self {
        Self::default()
    }

    /// A stream that claims to be an interactive terminal
    pub fn tty() -> Self {
        Self {
            tty: true,
            ..Self::default()
        }
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Drop everything written so far
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TermStream for MemoryStream {
    fn is_tty(&self) -> bool {
        self.tty
    }
}

/// A stream plus its TTY flag, sampled once
pub(crate) struct Output {
    stream: Box<dyn TermStream>,
    tty: bool,
}

impl Output {
    pub(crate) fn new(stream: Box<dyn TermStream>) -> Self {
        let tty = stream.is_tty();
        Self { stream, tty }
    }

    pub(crate) fn is_tty(&self) -> bool {
        self.tty
    }

    /// Write and flush; failures are logged and otherwise ignored
    pub(crate) fn emit(&mut self, text: &str) {
        let result = self
            .stream
            .write_all(text.as_bytes())
            .and_then(|()| self.stream.flush());
        if let Err(e) = result {
            tracing::debug!(error = %e, "Terminal write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_lines_sequence() {
        assert_eq!(clear_lines(0), "\r\x1b[K");
        assert_eq!(clear_lines(1), "\r\x1b[K");
        assert_eq!(clear_lines(3), "\r\x1b[K\x1b[1A\x1b[K\x1b[1A\x1b[K");
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count("single"), 1);
        assert_eq!(line_count("label\n  └─ state"), 2);
        assert_eq!(line_count(""), 1);
    }

    #[test]
    fn test_memory_stream_shares_buffer() {
        let stream = MemoryStream::tty();
        let mut output = Output::new(Box::new(stream.clone()));
        assert!(output.is_tty());

        output.emit("hello");
        assert_eq!(stream.contents(), "hello");

        stream.clear();
        assert_eq!(stream.contents(), "");
        assert!(!MemoryStream::new().is_tty());
    }
}
