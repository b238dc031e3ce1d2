//! Global logger settings
//!
//! The logger reads a single process-wide `LoggerConfig` on every call.
//! `configure` mutates it in place, `reset_config` restores the defaults.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::level::LogLevel;
use crate::traits::{RenderCoordinator, Transport};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `10:30:00 📌 [INFO ] [source] message`
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

/// Timestamp format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local wall clock, `HH:MM:SS`
    #[default]
    #[serde(rename = "time")]
    TimeOnly,
    /// UTC ISO 8601 with milliseconds, `2024-01-15T10:30:00.000Z`
    #[serde(rename = "iso")]
    Iso,
    /// No timestamp
    #[serde(rename = "none")]
    None,
}

impl FromStr for TimestampFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(TimestampFormat::TimeOnly),
            "iso" => Ok(TimestampFormat::Iso),
            "none" => Ok(TimestampFormat::None),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

/// Resolved logger configuration
#[derive(Clone)]
pub struct LoggerConfig {
    /// Minimum level to output
    pub min_level: LogLevel,

    /// Enable/disable all logging
    pub enabled: bool,

    /// Output format used by transports without an override
    pub format: OutputFormat,

    /// Timestamp format
    pub timestamp_format: TimestampFormat,

    /// Show emoji in output
    pub show_emoji: bool,

    /// Transports to write to; `None` means the default console transport
    pub transports: Option<Vec<Arc<dyn Transport>>>,

    /// Notified around every write so animations can step aside
    pub coordinator: Option<Arc<dyn RenderCoordinator>>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            enabled: true,
            format: OutputFormat::Pretty,
            timestamp_format: TimestampFormat::TimeOnly,
            show_emoji: true,
            transports: None,
            coordinator: None,
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("min_level", &self.min_level)
            .field("enabled", &self.enabled)
            .field("format", &self.format)
            .field("timestamp_format", &self.timestamp_format)
            .field("show_emoji", &self.show_emoji)
            .field("transports", &self.transports.as_ref().map(Vec::len))
            .field("coordinator", &self.coordinator.is_some())
            .finish()
    }
}

static GLOBAL_CONFIG: OnceLock<RwLock<LoggerConfig>> = OnceLock::new();

fn global() -> &'static RwLock<LoggerConfig> {
    GLOBAL_CONFIG.get_or_init(|| RwLock::new(LoggerConfig::default()))
}

/// Configure global logger settings
///
/// ```
/// use termkit_core::{configure, LogLevel, OutputFormat};
///
/// configure(|c| {
///     c.min_level = LogLevel::Warn;
///     c.format = OutputFormat::Json;
/// });
/// # termkit_core::reset_config();
/// ```
pub fn configure(update: impl FnOnce(&mut LoggerConfig)) {
    let mut guard = global().write().unwrap_or_else(PoisonError::into_inner);
    update(&mut guard);
}

/// Snapshot of the current global configuration
pub fn config() -> LoggerConfig {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Reset configuration to defaults (useful for testing)
pub fn reset_config() {
    configure(|c| *c = LoggerConfig::default());
}
