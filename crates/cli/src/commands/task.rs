//! task command - Task spinner demo
//!
//! Walks a task through a list of states, optionally resuming one that
//! started earlier, and finishes with success or failure.

use std::time::{Duration, Instant};

use clap::Args;
use termkit_term::{TaskSpinner, TaskSpinnerOptions};

use super::pause_for;
use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

/// Display labels for the default states
const STATE_LABELS: &[(&str, &str)] = &[
    ("submitted", "📤 Submitted"),
    ("validating", "🔍 Validating"),
    ("processing", "⚙️ Processing"),
    ("finalizing", "📦 Finalizing"),
    ("completed", "✅ Completed"),
];

/// Track a multi-state task
#[derive(Args, Debug)]
pub struct TaskArgs {
    /// Task label
    #[arg(default_value = "Processing batch")]
    pub label: String,

    /// States to walk through, in order
    #[arg(long, value_delimiter = ',', default_value = "submitted,validating,processing,finalizing")]
    pub states: Vec<String>,

    /// Time spent in each state in milliseconds
    #[arg(long, default_value_t = 1500)]
    pub step_ms: u64,

    /// Show the state on its own line
    #[arg(long)]
    pub multi_line: bool,

    /// Pretend the task started this many seconds ago
    #[arg(long)]
    pub started_secs_ago: Option<u64>,

    /// Fail with this message instead of succeeding
    #[arg(long)]
    pub fail: Option<String>,
}

/// Execute the task command
pub fn execute(args: TaskArgs, output_config: OutputConfig) -> ExitCode {
    let mut options = TaskSpinnerOptions::new().multi_line(args.multi_line);
    if !output_config.no_emoji {
        options = options.state_labels(STATE_LABELS.iter().copied());
    }

    let earlier = Duration::from_secs(args.started_secs_ago.unwrap_or(0));
    if args.started_secs_ago.is_some() {
        match jiff::Timestamp::now().checked_sub(earlier) {
            Ok(started_at) => options = options.started_at(started_at),
            Err(e) => tracing::debug!(error = %e, "Ignoring out-of-range start time"),
        }
    }

    let task = TaskSpinner::with_options(args.label.as_str(), options);
    let clock = Instant::now();
    let elapsed_ms = || {
        let elapsed = clock.elapsed() + earlier;
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    };

    task.start();
    for state in &args.states {
        task.update(state, elapsed_ms());
        pause_for(args.step_ms);
    }

    match &args.fail {
        Some(message) => {
            task.fail(message);
            ExitCode::GeneralError
        }
        None => {
            task.succeed(elapsed_ms(), None);
            ExitCode::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: TaskArgs,
    }

    #[test]
    fn test_default_states() {
        let parsed = Wrapper::try_parse_from(["task"]).unwrap();
        assert_eq!(
            parsed.args.states,
            ["submitted", "validating", "processing", "finalizing"]
        );
        assert_eq!(parsed.args.label, "Processing batch");
    }

    #[test]
    fn test_custom_states() {
        let parsed =
            Wrapper::try_parse_from(["task", "Export", "--states", "queued,running"]).unwrap();
        assert_eq!(parsed.args.states, ["queued", "running"]);
        assert_eq!(parsed.args.label, "Export");
    }
}
