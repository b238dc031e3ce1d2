//! termkit - terminal output toolkit demo
//!
//! Drives each termkit component from the command line: spinners, task
//! spinners, progress bars, the structured logger and the warning aggregator.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod exit_code;
mod output;

use commands::Cli;

fn main() {
    // Internal diagnostics only; user-facing logs go through termkit-core
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = commands::execute(cli);

    std::process::exit(exit_code.as_i32());
}
