//! termkit-core: logging half of the termkit toolkit
//!
//! This crate provides:
//! - A structured logger with levels, sources and emoji
//! - Pretty and JSON formatters
//! - Console, file and in-memory transports
//! - Global settings and a TOML configuration file
//! - A warning aggregator for batch jobs
//! - Small formatting helpers (elapsed time, counts, percentages, cost)
//! - Error-to-message extraction for log lines
//!
//! It knows nothing about terminal animation. Spinners plug into the logger
//! through the [`RenderCoordinator`] trait so that log lines never land in the
//! middle of an animation frame.

pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod humanize;
pub mod level;
pub mod logger;
pub mod message;
pub mod settings;
pub mod traits;
pub mod transport;
pub mod warnings;

pub use config::{Config, ConfigManager, LoggingSettings};
pub use entry::LogEntry;
pub use error::{Error, Result};
pub use format::{format_data, format_json, format_pretty, format_timestamp};
pub use humanize::{format_cost, format_count, format_duration, format_elapsed, format_percent};
pub use level::LogLevel;
pub use logger::{Emoji, Logger, LoggerBuilder};
pub use message::{extract_error_message, extract_message};
pub use settings::{
    LoggerConfig, OutputFormat, TimestampFormat, config, configure, reset_config,
};
pub use traits::{RenderCoordinator, Transport};
pub use transport::{ConsoleTransport, FileTransport, MemoryTransport};
pub use warnings::{AggregatedWarning, WarningAggregator};
