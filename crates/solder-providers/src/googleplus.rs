//! Google+ widgets provider.
//!
//! The simplest of the three: no DOM prerequisite, and the platform
//! script offers no render signal this system maps, so the only
//! normalized event is `googleplus:libraryLoaded`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use solder_core::{ConfigurableProvider, Document, Provider, WidgetEvent};

/// Classes that mark Google+ widget markup.
pub const MARKER_CLASSES: &[&str] = &[
    "g-interactivepost",
    "g-plusone",
    "g-person",
    "g-post",
    "g-follow",
    "g-hangout",
];

/// Id of the injected platform script element.
pub const SCRIPT_ID: &str = "googleplus-js";

/// Platform script endpoint.
pub const PLATFORM_URL: &str = "https://apis.google.com/js/platform.js";

/// Google+ provider configuration. No options are recognized.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GooglePlusConfig {}

/// The Google+ provider.
#[derive(Debug, Default)]
pub struct GooglePlusProvider;

#[async_trait]
impl Provider for GooglePlusProvider {
    fn name(&self) -> &'static str {
        "googleplus"
    }

    fn marker_classes(&self) -> &'static [&'static str] {
        MARKER_CLASSES
    }

    fn script_id(&self) -> &'static str {
        SCRIPT_ID
    }

    fn script_url(&self) -> String {
        PLATFORM_URL.to_string()
    }

    async fn on_library_loaded(&self, document: Arc<Document>) {
        document.dispatch(WidgetEvent::GooglePlusLibraryLoaded);
    }
}

impl ConfigurableProvider for GooglePlusProvider {
    type Config = GooglePlusConfig;

    fn config_key() -> &'static str {
        "googleplus"
    }

    fn from_config(_config: Self::Config) -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn library_loaded_dispatches_exactly_one_event() {
        let document = Document::new();
        let mut events = document.subscribe();

        let provider = GooglePlusProvider;
        provider.on_library_loaded(Arc::clone(&document)).await;

        assert_eq!(events.try_recv().unwrap(), WidgetEvent::GooglePlusLibraryLoaded);
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn descriptor_is_fixed() {
        let provider = GooglePlusProvider;
        assert_eq!(provider.script_id(), "googleplus-js");
        assert_eq!(provider.script_url(), PLATFORM_URL);
        assert!(provider.marker_classes().contains(&"g-follow"));
    }
}
