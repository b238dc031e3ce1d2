//! Error types for termkit-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for termkit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for termkit-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown log level name
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Unknown output or timestamp format name
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A transport could not deliver an entry
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::TomlParse(_) => 2, // UsageError
            Error::InvalidLevel(_) | Error::InvalidFormat(_) => 2, // UsageError
            _ => 1,                                        // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::InvalidLevel("loud".into()).exit_code(), 2);
        assert_eq!(Error::InvalidFormat("xml".into()).exit_code(), 2);
        assert_eq!(Error::Transport("test".into()).exit_code(), 1);
        let io = std::io::Error::other("disk full");
        assert_eq!(Error::Io(io).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidLevel("loud".into());
        assert_eq!(err.to_string(), "Invalid log level: loud");

        let err = Error::Transport("file closed".into());
        assert_eq!(err.to_string(), "Transport error: file closed");
    }
}
