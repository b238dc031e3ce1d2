//! spinner command - Animated spinner demo
//!
//! Starts a spinner, updates its text once per step and finishes with the
//! chosen outcome. With `--log-steps` a log line is written at every step
//! to show that log output and the animation never collide.

use clap::{Args, ValueEnum};
use termkit_core::Logger;
use termkit_term::{
    BAR_FRAMES, CLOCK_FRAMES, DEFAULT_FRAMES, DOTS_FRAMES, HOURGLASS_FRAMES, Spinner,
    SpinnerOptions,
};

use super::pause_for;
use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

/// Built-in frame sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameSet {
    Dots,
    Hourglass,
    Clock,
    Ellipsis,
    Bar,
}

impl FrameSet {
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            Self::Dots => DEFAULT_FRAMES,
            Self::Hourglass => HOURGLASS_FRAMES,
            Self::Clock => CLOCK_FRAMES,
            Self::Ellipsis => DOTS_FRAMES,
            Self::Bar => BAR_FRAMES,
        }
    }
}

/// How the spinner finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    Succeed,
    Fail,
    Warn,
    Info,
    Stop,
}

/// Run an animated spinner
#[derive(Args, Debug)]
pub struct SpinnerArgs {
    /// Spinner text
    #[arg(default_value = "Working")]
    pub text: String,

    /// Number of text updates before finishing
    #[arg(long, default_value_t = 3)]
    pub steps: u32,

    /// Delay before each step in milliseconds
    #[arg(long, default_value_t = 600)]
    pub step_ms: u64,

    /// Frame set
    #[arg(long, value_enum, default_value_t = FrameSet::Dots)]
    pub frames: FrameSet,

    /// Final status
    #[arg(long, value_enum, default_value_t = Outcome::Succeed)]
    pub outcome: Outcome,

    /// Text of the final line (default: the current text)
    #[arg(long)]
    pub final_text: Option<String>,

    /// Write a log line at every step
    #[arg(long)]
    pub log_steps: bool,

    /// Hide the elapsed time
    #[arg(long)]
    pub no_elapsed: bool,
}

/// Execute the spinner command
pub fn execute(args: SpinnerArgs, _output_config: OutputConfig) -> ExitCode {
    let spinner = Spinner::with_options(
        args.text.as_str(),
        SpinnerOptions::new()
            .frames(args.frames.frames().iter().copied())
            .show_elapsed(!args.no_elapsed),
    );
    let logger = Logger::builder().source("spinner").build();

    spinner.start(None);
    for step in 1..=args.steps {
        pause_for(args.step_ms);
        spinner.update(step_text(&args.text, step, args.steps));
        if args.log_steps {
            logger.info(format!("Step {step} of {} finished", args.steps));
        }
    }

    let final_text = args.final_text.as_deref();
    match args.outcome {
        Outcome::Succeed => spinner.succeed(final_text),
        Outcome::Fail => spinner.fail(final_text),
        Outcome::Warn => spinner.warn(final_text),
        Outcome::Info => spinner.info(final_text),
        Outcome::Stop => spinner.stop(),
    }

    if args.outcome == Outcome::Fail {
        ExitCode::GeneralError
    } else {
        ExitCode::Success
    }
}

fn step_text(text: &str, step: u32, steps: u32) -> String {
    format!("{text} [{step}/{steps}]")
}
