//! # Solder Runtime
//!
//! Orchestration layer for the Solder widget loader.
//!
//! This crate provides:
//! - Runtime orchestration ([`SolderRuntime`]): per-document markup
//!   detection, provider prerequisites, and idempotent script requests
//! - Layered configuration loading ([`ConfigLoader`], `solder.toml` /
//!   `solder.yaml` / `SOLDER_*` environment variables)
//! - Logging configuration ([`logging::LoggingBuilder`])
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: TOML configuration files
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output
//!
//! # Usage
//!
//! ```rust,ignore
//! use solder_core::Document;
//! use solder_runtime::SolderRuntime;
//!
//! let document = Document::from_html(&page_html);
//! let runtime = SolderRuntime::new(document);
//! runtime.register_provider::<FacebookProvider>()?;
//! runtime.register_provider::<GooglePlusProvider>()?;
//! runtime.register_provider::<TwitterProvider>()?;
//!
//! let activation = runtime.activate().await;
//! tracing::info!(?activation, "widget providers activated");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, LogFormat, LogLevel, LogOutput, LoggingConfig,
    SolderConfig, load_config, load_config_from_file,
};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;
pub use runtime::{Activation, RuntimeBuilder, SolderRuntime};

// Re-export tracing for use by embedders
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
