//! CLI command definitions and execution
//!
//! Each subcommand exercises one termkit component. Logging is configured
//! once, before dispatch, from the config file, the environment and the
//! global flags (in that order of precedence, lowest first).

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use termkit_core::{ConfigManager, LogLevel, OutputFormat, extract_error_message};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod log;
mod progress;
mod spinner;
mod task;
mod warnings;

/// termkit - terminal output toolkit
///
/// Spinners, progress bars and a structured logger that never draws over
/// an animation.
#[derive(Parser, Debug)]
#[command(name = "termkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: <config dir>/termkit/config.toml)
    #[arg(long, global = true, env = "TERMKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum log level: trace, debug, info, warn, error, fatal
    #[arg(long, global = true)]
    pub level: Option<LogLevel>,

    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable emoji in log lines and state labels
    #[arg(long, global = true, default_value = "false")]
    pub no_emoji: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress log output and non-error results
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an animated spinner
    Spinner(spinner::SpinnerArgs),

    /// Track a multi-state task with a task spinner
    Task(task::TaskArgs),

    /// Run a progress bar
    Progress(progress::ProgressArgs),

    /// Write one log entry
    Log(log::LogArgs),

    /// Aggregate warnings and print one summary line per category
    Warnings(warnings::WarningsArgs),
}

/// Execute the CLI command and return an exit code
pub fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_emoji: cli.no_emoji,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config.clone());

    if output_config.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Err(e) = init_logging(&cli) {
        formatter.error(&extract_error_message(&e));
        return ExitCode::from_error(&e);
    }

    match cli.command {
        Commands::Spinner(args) => spinner::execute(args, output_config),
        Commands::Task(args) => task::execute(args, output_config),
        Commands::Progress(args) => progress::execute(args, output_config),
        Commands::Log(args) => log::execute(args, output_config),
        Commands::Warnings(args) => warnings::execute(args, output_config),
    }
}

/// Load the config file and apply environment and flag overrides
fn init_logging(cli: &Cli) -> termkit_core::Result<()> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let settings = manager.load()?.logging.with_env_overrides()?;
    tracing::debug!(path = %manager.config_path().display(), ?settings, "Logging configured");

    termkit_core::configure(|config| {
        settings.apply(config);
        if let Some(level) = cli.level {
            config.min_level = level;
        }
        if cli.json {
            config.format = OutputFormat::Json;
        }
        if cli.no_emoji {
            config.show_emoji = false;
        }
        if cli.quiet {
            config.enabled = false;
        }
    });
    termkit_term::coordinate_logging();
    Ok(())
}

/// Delay between demo steps
pub(crate) fn pause_for(millis: u64) {
    if millis > 0 {
        std::thread::sleep(Duration::from_millis(millis));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "termkit", "--level", "WARN", "--json", "--no-emoji", "log", "info", "hello",
        ])
        .unwrap();
        assert_eq!(cli.level, Some(LogLevel::Warn));
        assert!(cli.json);
        assert!(cli.no_emoji);
        assert!(matches!(cli.command, Commands::Log(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["termkit", "progress", "--total", "5", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let result = Cli::try_parse_from(["termkit", "--level", "loud", "log", "info", "x"]);
        assert!(result.is_err());
    }
}
