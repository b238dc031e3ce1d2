//! Log line formatters
//!
//! Turn a `LogEntry` into the text a transport writes. Pretty output is meant
//! for humans on a terminal, JSON output for log shippers.

use serde::Serialize;
use serde_json::Value;

use crate::entry::LogEntry;
use crate::error::Result;
use crate::settings::TimestampFormat;

/// Format the current time according to `format`
pub fn format_timestamp(format: TimestampFormat) -> Option<String> {
    match format {
        TimestampFormat::None => None,
        TimestampFormat::TimeOnly => Some(jiff::Zoned::now().strftime("%H:%M:%S").to_string()),
        TimestampFormat::Iso => {
            let now = jiff::Timestamp::now();
            Some(format!("{now:.3}"))
        }
    }
}

/// Format a log entry as pretty human-readable output
///
/// Layout: `timestamp emoji [LEVEL] [source] message`, skipping absent parts.
pub fn format_pretty(entry: &LogEntry) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(5);

    if let Some(timestamp) = &entry.timestamp {
        parts.push(timestamp.clone());
    }

    if !entry.emoji.is_empty() {
        parts.push(entry.emoji.clone());
    }

    parts.push(format!("[{:<5}]", entry.level.label()));

    if let Some(source) = &entry.source {
        parts.push(format!("[{source}]"));
    }

    parts.push(entry.message.clone());

    parts.join(" ")
}

/// Format attached data for pretty output
///
/// Strings are printed raw, anything else as compact JSON.
pub fn format_data(data: Option<&Value>) -> String {
    match data {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji: Option<&'a str>,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

/// Format a log entry as a single JSON object
pub fn format_json(entry: &LogEntry) -> Result<String> {
    let line = JsonLine {
        timestamp: entry.timestamp.as_deref(),
        level: entry.level.label(),
        source: entry.source.as_deref(),
        emoji: (!entry.emoji.is_empty()).then_some(entry.emoji.as_str()),
        message: &entry.message,
        data: entry.data.as_ref(),
    };
    Ok(serde_json::to_string(&line)?)
}
