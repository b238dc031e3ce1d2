//! Log entry passed to transports

use serde_json::Value;

use crate::level::LogLevel;

/// A single, fully resolved log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Formatted timestamp, absent when timestamps are disabled
    pub timestamp: Option<String>,

    /// Severity
    pub level: LogLevel,

    /// Source/context name of the logger that produced the entry
    pub source: Option<String>,

    /// Resolved emoji, empty when emoji output is disabled
    pub emoji: String,

    /// The message itself
    pub message: String,

    /// Structured payload attached to the message
    pub data: Option<Value>,
}

impl LogEntry {
    /// Create an entry with only a level and a message
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            level,
            source: None,
            emoji: String::new(),
            message: message.into(),
            data: None,
        }
    }
}
