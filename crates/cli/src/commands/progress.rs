//! progress command - Progress bar demo

use clap::Args;
use termkit_term::{ProgressBar, ProgressBarOptions};

use super::pause_for;
use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

/// Run a progress bar
#[derive(Args, Debug)]
pub struct ProgressArgs {
    /// Number of items
    #[arg(long, default_value_t = 40)]
    pub total: u64,

    /// Delay per item in milliseconds
    #[arg(long, default_value_t = 75)]
    pub step_ms: u64,

    /// Bar width in cells
    #[arg(long, default_value_t = 30)]
    pub width: usize,

    /// Hide the current/total count
    #[arg(long)]
    pub no_count: bool,

    /// Hide the elapsed time
    #[arg(long)]
    pub no_elapsed: bool,

    /// Final line text
    #[arg(long)]
    pub final_text: Option<String>,
}

/// Execute the progress command
pub fn execute(args: ProgressArgs, _output_config: OutputConfig) -> ExitCode {
    let mut bar = ProgressBar::with_options(
        ProgressBarOptions::new(args.total)
            .width(args.width)
            .show_count(!args.no_count)
            .show_elapsed(!args.no_elapsed),
    );

    for item in 1..=args.total {
        pause_for(args.step_ms);
        bar.increment(1, Some(&format!("item {item}")));
    }
    bar.stop(args.final_text.as_deref());

    ExitCode::Success
}
