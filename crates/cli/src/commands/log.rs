//! log command - Write one log entry
//!
//! Goes through the same logger, transports and format settings as any
//! other termkit user, so it doubles as a config file check.

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use termkit_core::{LogLevel, Logger};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Write one log entry
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Entry level: trace, debug, info, warn, error, fatal
    pub severity: LogLevel,

    /// Message text
    pub message: String,

    /// Source tag shown as [source]
    #[arg(long)]
    pub source: Option<String>,

    /// Emoji replacing the level default
    #[arg(long)]
    pub emoji: Option<String>,

    /// Structured data attached to the entry, as JSON
    #[arg(long)]
    pub data: Option<String>,
}

/// Execute the log command
pub fn execute(args: LogArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let data = match args.data.as_deref().map(parse_data).transpose() {
        Ok(data) => data,
        Err(e) => {
            formatter.error(&format!("{e:#}"));
            return ExitCode::UsageError;
        }
    };

    let mut builder = Logger::builder();
    if let Some(source) = args.source {
        builder = builder.source(source);
    }
    if let Some(emoji) = args.emoji {
        builder = builder.emoji(emoji);
    }
    let logger = builder.build();

    match data {
        Some(data) => logger.log_with(args.severity, args.message, data),
        None => logger.log(args.severity, args.message),
    }

    ExitCode::Success
}

fn parse_data(raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("--data is not valid JSON: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data() {
        let value = parse_data(r#"{"rows": 12}"#).unwrap();
        assert_eq!(value["rows"], 12);

        let err = parse_data("{rows").unwrap_err();
        assert!(format!("{err:#}").starts_with("--data is not valid JSON: {rows"));
    }
}
