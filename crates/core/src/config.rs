//! Configuration management
//!
//! This module handles loading and saving the termkit configuration file.
//! The configuration file is stored in TOML format at ~/.config/termkit/config.toml
//! and only carries logger settings; it is applied on top of the defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::level::LogLevel;
use crate::settings::{LoggerConfig, OutputFormat, TimestampFormat};
use crate::traits::Transport;
use crate::transport::{ConsoleTransport, FileTransport};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "TERMKIT_CONFIG_DIR";

/// Environment variable overriding `logging.min_level`
pub const LEVEL_ENV: &str = "TERMKIT_LOG_LEVEL";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Logger settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            logging: LoggingSettings::default(),
        }
    }
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level to output
    #[serde(default = "default_min_level")]
    pub min_level: LogLevel,

    /// Enable/disable all logging
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// "pretty" or "json"
    #[serde(default)]
    pub format: OutputFormat,

    /// "time", "iso" or "none"
    #[serde(default)]
    pub timestamp: TimestampFormat,

    /// Show emoji in output
    #[serde(default = "default_true")]
    pub show_emoji: bool,

    /// Write to the terminal
    #[serde(default = "default_true")]
    pub console: bool,

    /// Also append to this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Format override for the log file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<OutputFormat>,
}

fn default_min_level() -> LogLevel {
    LogLevel::Debug
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            min_level: default_min_level(),
            enabled: true,
            format: OutputFormat::default(),
            timestamp: TimestampFormat::default(),
            show_emoji: true,
            console: true,
            file: None,
            file_format: None,
        }
    }
}

impl LoggingSettings {
    /// Apply `TERMKIT_LOG_LEVEL` when it is set
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(level) = std::env::var(LEVEL_ENV) {
            self.min_level = level.parse()?;
        }
        Ok(self)
    }

    /// Copy these settings into a logger configuration
    ///
    /// Transports are only replaced when the settings ask for something other
    /// than the default console output. The coordinator is left untouched.
    pub fn apply(&self, config: &mut LoggerConfig) {
        config.min_level = self.min_level;
        config.enabled = self.enabled;
        config.format = self.format;
        config.timestamp_format = self.timestamp;
        config.show_emoji = self.show_emoji;

        if self.console && self.file.is_none() {
            config.transports = None;
            return;
        }

        let mut transports: Vec<Arc<dyn Transport>> = Vec::new();
        if self.console {
            transports.push(Arc::new(ConsoleTransport::new()));
        }
        if let Some(path) = &self.file {
            let mut file = FileTransport::new(path);
            if let Some(format) = self.file_format {
                file = file.with_format(format);
            }
            transports.push(Arc::new(file));
        }
        config.transports = Some(transports);
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// `TERMKIT_CONFIG_DIR` takes precedence over the platform config directory.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("termkit"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade termkit.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }
}
