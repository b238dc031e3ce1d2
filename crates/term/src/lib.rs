//! termkit-term: terminal animation half of the termkit toolkit
//!
//! This crate provides:
//! - [`Spinner`]: animated spinner with status symbols
//! - [`TaskSpinner`]: spinner tracking a long-running task's state and elapsed time
//! - [`ProgressBar`]: determinate progress bar
//! - [`SpinnerManager`]: keeps spinners out of the way of log lines
//!
//! Every element checks whether its stream is an interactive terminal. If it
//! is not, output degrades to plain newline-terminated lines with no control
//! sequences, suitable for CI logs and pipes.
//!
//! Call [`coordinate_logging`] once at startup so that `termkit_core::Logger`
//! pauses running spinners around each log line.

pub mod manager;
pub mod progress;
pub mod spinner;
pub mod stream;
pub mod task;
mod ticker;

pub use manager::{Animation, SpinnerId, SpinnerManager, coordinate_logging};
pub use progress::{ProgressBar, ProgressBarOptions};
pub use spinner::{
    BAR_FRAMES, CLOCK_FRAMES, DEFAULT_FRAMES, DOTS_FRAMES, HOURGLASS_FRAMES, Spinner,
    SpinnerOptions,
};
pub use stream::{MemoryStream, TermStream, stderr, stdout};
pub use task::{TaskSpinner, TaskSpinnerOptions};
