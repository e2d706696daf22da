//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use solder_core::{DomError, ProviderError};

/// Errors that can occur during runtime operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Provider configuration deserialization failed.
    #[error("failed to deserialize provider config: {0}")]
    ProviderConfigDeserialize(String),

    /// Provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Document mutation error.
    #[error("document error: {0}")]
    Dom(#[from] DomError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
