//! Seams between the logger and the outside world
//!
//! A `Transport` receives finished log entries. A `RenderCoordinator` is told
//! before and after every write so that animated output sharing the terminal
//! can step out of the way. Both can be mocked for testing.

use crate::entry::LogEntry;
use crate::error::Result;

/// Destination for log entries
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// Write one entry
    fn write(&self, entry: &LogEntry) -> Result<()>;
}

/// Something that draws on the terminal and must be suspended while a log
/// line is written.
///
/// The logger calls `pause` before handing an entry to its transports and
/// `resume` afterwards. Implementations must tolerate repeated calls.
#[cfg_attr(test, mockall::automock)]
pub trait RenderCoordinator: Send + Sync {
    /// Erase any in-progress animation without stopping it
    fn pause(&self);

    /// Redraw whatever `pause` erased
    fn resume(&self);
}
