//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Configuration could not be parsed or extracted.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The file format is not supported (or its feature is disabled).
    #[error("unsupported or disabled configuration file format: .{0}")]
    UnsupportedFormat(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
