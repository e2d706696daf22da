//! Configuration loader using figment.
//!
//! Sources are layered, later ones overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. Profile-specific config file (`solder.{profile}.toml` / `.yaml`)
//! 3. Main config file (`solder.toml` / `solder.yaml` / `config.*`)
//! 4. Environment variables (`SOLDER_*`, `__` as nesting separator)
//! 5. Programmatic overrides
//!
//! Which file formats are searched is controlled by the `toml-config`
//! *(default)* and `yaml-config` features.
//!
//! Environment variables map with the `SOLDER_` prefix:
//! `SOLDER_LOGGING__LEVEL=debug` → `logging.level = "debug"`,
//! `SOLDER_PROVIDERS__FACEBOOK__APP_ID=123` →
//! `providers.facebook.app_id = "123"`.

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::SolderConfig;

/// Configuration profile for environment-specific settings.
#[derive(Debug, Clone, Default)]
pub enum Profile {
    /// Development profile (default).
    #[default]
    Development,
    /// Production profile.
    Production,
    /// Custom profile name.
    Custom(String),
}

impl Profile {
    /// Returns the profile name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Creates a profile from `SOLDER_PROFILE` or defaults to Development.
    pub fn from_env() -> Self {
        std::env::var("SOLDER_PROFILE")
            .map(|p| Self::from_name(&p))
            .unwrap_or_default()
    }

    fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration loader with figment-based multi-source support.
///
/// # Example
///
/// ```rust,ignore
/// let config = ConfigLoader::new()
///     .file("solder.toml")
///     .with_env()
///     .load()?;
/// ```
pub struct ConfigLoader {
    /// Programmatic overrides, merged last.
    overrides: Figment,
    /// Configuration profile.
    profile: Profile,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Profile::from_name(&profile.into());
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds the current directory to the search paths.
    pub fn with_current_dir(self) -> Self {
        if let Ok(cwd) = std::env::current_dir() {
            self.search_path(cwd)
        } else {
            self
        }
    }

    /// Adds the user config directory (`<config>/solder`) to the search
    /// paths.
    pub fn with_user_config_dir(self) -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            self.search_path(config_dir.join("solder"))
        } else {
            self
        }
    }

    /// Sets a specific configuration file to load instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically, overriding file
    /// and environment sources.
    pub fn merge(mut self, config: SolderConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<SolderConfig> {
        let profile = self.profile.clone();
        let figment = self.build_figment()?;

        let config: SolderConfig = figment
            .extract()
            .map_err(|e| ConfigError::Parse(format!("failed to extract configuration: {e}")))?;

        debug!(
            profile = %profile,
            logging_level = %config.logging.level,
            providers = config.providers.len(),
            "configuration loaded"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources in priority order.
    fn build_figment(self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(SolderConfig::default()));

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            info!(path = %path.display(), "loading configuration file");
            figment = merge_file(figment, path)?;
        } else {
            figment = self.search_config_files(figment);
        }

        if self.load_env {
            trace!("loading environment variables with SOLDER_ prefix");
            figment = figment.merge(
                Env::prefixed("SOLDER_")
                    .split("__")
                    .map(|key| key.as_str().replace("__", ".").into()),
            );
        }

        Ok(figment.merge(self.overrides))
    }

    /// Searches the configured paths for config files and merges what it
    /// finds: the profile-specific variant first, then the base file.
    fn search_config_files(&self, mut figment: Figment) -> Figment {
        let search_paths = if self.search_paths.is_empty() {
            default_search_paths()
        } else {
            self.search_paths.clone()
        };

        let mut found = false;
        'search: for search_path in &search_paths {
            for base_name in base_names() {
                let (stem, ext) = base_name
                    .rsplit_once('.')
                    .expect("base names carry an extension");

                let profile_path =
                    search_path.join(format!("{stem}.{}.{ext}", self.profile.as_str()));
                if profile_path.exists() {
                    debug!(path = %profile_path.display(), "loading profile-specific config");
                    if let Ok(merged) = merge_file(figment.clone(), &profile_path) {
                        figment = merged;
                    }
                }

                let base_path = search_path.join(base_name);
                if base_path.exists() {
                    info!(path = %base_path.display(), "loading configuration file");
                    if let Ok(merged) = merge_file(figment.clone(), &base_path) {
                        figment = merged;
                    }
                    found = true;
                    break 'search;
                }
            }
        }

        if !found {
            debug!("no configuration file found, using defaults");
        }
        figment
    }
}

/// Base file names searched, in priority order, across enabled formats.
#[allow(unused_mut)]
fn base_names() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "toml-config")]
    names.extend(["solder.toml", "config.toml"]);
    #[cfg(feature = "yaml-config")]
    names.extend(["solder.yaml", "solder.yml", "config.yaml"]);
    names
}

/// Merges a single config file, dispatching on file extension.
fn merge_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        #[cfg(feature = "toml-config")]
        "toml" => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        other => {
            warn!(extension = other, "unsupported configuration file format");
            Err(ConfigError::UnsupportedFormat(other.to_string()))
        }
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("solder"));
    }
    paths
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<SolderConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from a specific file.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<SolderConfig> {
    ConfigLoader::new().file(path).load()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogLevel;

    #[test]
    fn default_config_loads_without_any_sources() {
        let config = ConfigLoader::new().without_env().load().unwrap();

        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ConfigLoader::new()
            .without_env()
            .file("/nonexistent/solder.toml")
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn programmatic_merge_overrides_defaults() {
        let mut overrides = SolderConfig::default();
        overrides.logging.level = LogLevel::Debug;

        let config = ConfigLoader::new()
            .without_env()
            .merge(overrides)
            .load()
            .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn profile_from_env_recognizes_production() {
        // SAFETY: this test is single-threaded and cleans up immediately after
        unsafe {
            std::env::set_var("SOLDER_PROFILE", "production");
        }
        let profile = Profile::from_env();
        assert!(matches!(profile, Profile::Production));
        unsafe {
            std::env::remove_var("SOLDER_PROFILE");
        }
    }
}
