//! Provider trait.
//!
//! A provider owns everything specific to one third-party widget system:
//! the marker classes whose presence activates it, its script URL and
//! element id, any DOM or global prerequisite, and the translation of the
//! provider's native load/render signaling into normalized
//! [`WidgetEvent`](crate::WidgetEvent)s.
//!
//! The runtime drives providers through this trait:
//!
//! ```text
//! markup detected ──▶ prepare() ──▶ ScriptLoader::load ──▶ on_library_loaded()
//! ```
//!
//! A provider whose markup is absent is never touched at all.

use std::sync::Arc;

use async_trait::async_trait;

use crate::dom::Document;
use crate::error::ProviderResult;

/// A third-party widget provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the provider name (e.g. "facebook").
    fn name(&self) -> &'static str;

    /// Returns the marker classes whose presence activates this provider.
    fn marker_classes(&self) -> &'static [&'static str];

    /// Returns the unique id of the provider's injected script element.
    fn script_id(&self) -> &'static str;

    /// Builds the provider's script URL from its configuration.
    fn script_url(&self) -> String;

    /// Establishes DOM or global prerequisites before script injection.
    ///
    /// Called after markup detection and before
    /// [`ScriptLoader::load`](crate::ScriptLoader::load). Must be
    /// idempotent: re-activation finds prerequisites already in place.
    fn prepare(&self, document: &Arc<Document>) -> ProviderResult<()> {
        let _ = document;
        Ok(())
    }

    /// Translates the script's load completion into normalized events.
    ///
    /// Runs as the loader's completion continuation: dispatch the
    /// provider's `libraryLoaded` event here and wire up any persistent
    /// native-signal subscriptions.
    async fn on_library_loaded(&self, document: Arc<Document>);
}

/// A shared provider trait object.
pub type BoxedProvider = Arc<dyn Provider>;

/// Trait for providers that can be created from configuration.
///
/// Separates compile-time concerns (`Config` type, `from_config()`) from
/// the object-safe [`Provider`] trait.
pub trait ConfigurableProvider: Provider {
    /// The configuration type, deserialized from the `providers` section.
    type Config: serde::de::DeserializeOwned + Default;

    /// Returns the key this provider's configuration lives under.
    fn config_key() -> &'static str
    where
        Self: Sized;

    /// Creates a provider instance from its deserialized configuration.
    fn from_config(config: Self::Config) -> Self
    where
        Self: Sized;
}
