//! Structured logger
//!
//! A `Logger` is a cheap handle carrying an optional source name and emoji
//! override. Everything else (level filter, format, transports, coordinator)
//! comes from the global settings at the time of each call.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::entry::LogEntry;
use crate::format::format_timestamp;
use crate::level::LogLevel;
use crate::settings;
use crate::traits::Transport;
use crate::transport::ConsoleTransport;

/// Emoji resolver signature: message and level in, emoji out
pub type EmojiFn = dyn Fn(&str, LogLevel) -> String + Send + Sync;

/// Emoji shown in front of a logger's messages
#[derive(Clone)]
pub enum Emoji {
    /// Always the same emoji
    Static(String),
    /// Emoji computed from each message
    Dynamic(Arc<EmojiFn>),
}

impl Emoji {
    /// Build a dynamic emoji from a closure
    pub fn dynamic(resolver: impl Fn(&str, LogLevel) -> String + Send + Sync + 'static) -> Self {
        Emoji::Dynamic(Arc::new(resolver))
    }

    fn resolve(&self, message: &str, level: LogLevel) -> String {
        match self {
            Emoji::Static(emoji) => emoji.clone(),
            Emoji::Dynamic(resolver) => resolver(message, level),
        }
    }
}

impl fmt::Debug for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emoji::Static(emoji) => f.debug_tuple("Static").field(emoji).finish(),
            Emoji::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Emoji {
    fn from(emoji: &str) -> Self {
        Emoji::Static(emoji.to_string())
    }
}

impl From<String> for Emoji {
    fn from(emoji: String) -> Self {
        Emoji::Static(emoji)
    }
}

/// Default emoji selection: links get 🔗 at info level, otherwise the level emoji
pub fn default_emoji(message: &str, level: LogLevel) -> &'static str {
    if level == LogLevel::Info && (message.contains("http://") || message.contains("https://")) {
        return "🔗";
    }
    level.emoji()
}

fn default_transport() -> Arc<dyn Transport> {
    static DEFAULT: OnceLock<Arc<dyn Transport>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| Arc::new(ConsoleTransport::new()))
        .clone()
}

/// Logger instance
///
/// ```no_run
/// use termkit_core::Logger;
///
/// let log = Logger::builder().source("DatabaseService").build();
/// log.info("Connected");
/// // 10:30:00 📌 [INFO ] [DatabaseService] Connected
/// ```
#[derive(Debug, Clone, Default)]
pub struct Logger {
    source: Option<String>,
    emoji: Option<Emoji>,
}

impl Logger {
    /// Create an anonymous logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a logger with a source or emoji
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Source name for this logger
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Custom emoji for this logger
    pub fn emoji(&self) -> Option<&Emoji> {
        self.emoji.as_ref()
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn trace_with(&self, message: impl Into<String>, data: Value) {
        self.log_with(LogLevel::Trace, message, data);
    }

    pub fn debug_with(&self, message: impl Into<String>, data: Value) {
        self.log_with(LogLevel::Debug, message, data);
    }

    pub fn info_with(&self, message: impl Into<String>, data: Value) {
        self.log_with(LogLevel::Info, message, data);
    }

    pub fn warn_with(&self, message: impl Into<String>, data: Value) {
        self.log_with(LogLevel::Warn, message, data);
    }

    pub fn error_with(&self, message: impl Into<String>, data: Value) {
        self.log_with(LogLevel::Error, message, data);
    }

    pub fn fatal_with(&self, message: impl Into<String>, data: Value) {
        self.log_with(LogLevel::Fatal, message, data);
    }

    /// Log a message without attached data
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.write(level, message.into(), None);
    }

    /// Log a message with a structured payload
    pub fn log_with(&self, level: LogLevel, message: impl Into<String>, data: Value) {
        self.write(level, message.into(), Some(data));
    }

    fn resolve_emoji(&self, message: &str, level: LogLevel) -> String {
        match &self.emoji {
            Some(emoji) => emoji.resolve(message, level),
            None => default_emoji(message, level).to_string(),
        }
    }

    fn write(&self, level: LogLevel, message: String, data: Option<Value>) {
        let config = settings::config();

        if !config.enabled || level < config.min_level {
            return;
        }

        let emoji = if config.show_emoji {
            self.resolve_emoji(&message, level)
        } else {
            String::new()
        };

        let entry = LogEntry {
            timestamp: format_timestamp(config.timestamp_format),
            level,
            source: self.source.clone(),
            emoji,
            message,
            data,
        };

        let transports = config
            .transports
            .unwrap_or_else(|| vec![default_transport()]);

        if let Some(coordinator) = &config.coordinator {
            coordinator.pause();
        }

        for transport in &transports {
            if let Err(e) = transport.write(&entry) {
                tracing::warn!(error = %e, level = %level, "Logger transport error");
            }
        }

        if let Some(coordinator) = &config.coordinator {
            coordinator.resume();
        }
    }
}

/// Builder for [`Logger`]
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    source: Option<String>,
    emoji: Option<Emoji>,
}

impl LoggerBuilder {
    /// Source/context name, e.g. `ApiClient`
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Override the emoji for every message
    pub fn emoji(mut self, emoji: impl Into<Emoji>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            source: self.source,
            emoji: self.emoji,
        }
    }
}
