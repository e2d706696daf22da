//! Configuration module for the Solder runtime.
//!
//! Provides layered, figment-based configuration loading for logging
//! settings and per-provider options.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{LogFormat, LogLevel, LogOutput, LoggingConfig, SolderConfig};
