//! Unified error types for the Solder core engine.
//!
//! The error taxonomy is deliberately small: absent markup and
//! already-injected scripts are normal control flow, and a script that
//! never finishes loading is silent by contract. Errors exist only where
//! an operation can structurally fail.

use thiserror::Error;

// =============================================================================
// DOM Errors
// =============================================================================

/// Errors produced by structural mutations of the element tree.
#[derive(Debug, Clone, Error)]
pub enum DomError {
    /// The reference element for an insertion is not attached to the tree.
    #[error("reference element <{tag}> is not attached to the tree")]
    DetachedReference {
        /// Tag name of the detached reference element.
        tag: String,
    },

    /// A required structural element is missing from the document.
    #[error("document has no <{tag}> element")]
    MissingElement {
        /// The missing tag name.
        tag: &'static str,
    },
}

// =============================================================================
// Provider Errors
// =============================================================================

/// Errors that can occur in provider operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Provider configuration was invalid.
    #[error("invalid provider configuration: {reason}")]
    InvalidConfig {
        /// Reason for failure.
        reason: String,
    },

    /// A DOM prerequisite could not be established.
    #[error("document prerequisite failed: {0}")]
    Dom(#[from] DomError),

    /// Internal provider error.
    #[error("provider error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Creates an internal provider error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for DOM mutations.
pub type DomResult<T> = Result<T, DomError>;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
