//! Output formatting utilities
//!
//! Formats command results in either human-readable or JSON form.

mod formatter;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Use plain state labels instead of emoji ones
    pub no_emoji: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
