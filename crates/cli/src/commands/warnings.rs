//! warnings command - Warning aggregation demo
//!
//! Each argument is one warning written as `category=message` or
//! `category=message@detail`. Repeated categories collapse into a single
//! summary line; in JSON mode the summary is printed as an array.

use clap::Args;
use termkit_core::{Logger, WarningAggregator, warnings::DEFAULT_MAX_EXAMPLES};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Aggregate warnings by category
#[derive(Args, Debug)]
pub struct WarningsArgs {
    /// Warnings as category=message[@detail]
    #[arg(required = true)]
    pub warnings: Vec<String>,

    /// Example details kept per category
    #[arg(long, default_value_t = DEFAULT_MAX_EXAMPLES)]
    pub max_examples: usize,
}

/// One parsed warning argument
#[derive(Debug, PartialEq, Eq)]
struct RawWarning<'a> {
    category: &'a str,
    message: &'a str,
    detail: Option<&'a str>,
}

fn parse_warning(raw: &str) -> Option<RawWarning<'_>> {
    let (category, rest) = raw.split_once('=')?;
    let category = category.trim();
    if category.is_empty() {
        return None;
    }
    let (message, detail) = match rest.rsplit_once('@') {
        Some((message, detail)) if !detail.is_empty() => (message, Some(detail)),
        _ => (rest, None),
    };
    Some(RawWarning {
        category,
        message,
        detail,
    })
}

/// Execute the warnings command
pub fn execute(args: WarningsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let mut aggregator = WarningAggregator::with_max_examples(args.max_examples);

    for raw in &args.warnings {
        let Some(warning) = parse_warning(raw) else {
            formatter.error(&format!(
                "Invalid warning '{raw}': expected category=message[@detail]"
            ));
            return ExitCode::UsageError;
        };
        aggregator.add(warning.category, warning.message, warning.detail);
    }

    if formatter.is_json() {
        if !formatter.is_quiet() {
            formatter.json(&aggregator.summary());
        }
        return ExitCode::Success;
    }

    let logger = Logger::builder().source("warnings").build();
    aggregator.flush(&logger);
    ExitCode::Success
}
