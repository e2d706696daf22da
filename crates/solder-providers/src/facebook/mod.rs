//! Facebook widgets provider.
//!
//! Activates on the `fb-*` widget classes, guarantees the `#fb-root`
//! container the SDK insists on, and republishes the SDK's signals:
//! `facebook:libraryLoaded` once on script completion, then
//! `facebook:loaded` every time the SDK reports an `xfbml.render` pass.

mod sdk;

pub use sdk::{FacebookSdk, FacebookSignal};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use solder_core::{ConfigurableProvider, Document, DomError, Provider, ProviderResult, WidgetEvent};

/// Classes that mark Facebook widget markup.
pub const MARKER_CLASSES: &[&str] = &[
    "fb-like",
    "fb-share-button",
    "fb-send",
    "fb-post",
    "fb-video",
    "fb-comments",
    "fb-page",
    "fb-follow",
];

/// Id of the injected SDK script element.
pub const SCRIPT_ID: &str = "facebook-jssdk";

/// SDK endpoint, pinned to the locale and version the widgets expect.
pub const SDK_URL: &str = "https://connect.facebook.net/en_US/sdk.js#xfbml=1&version=v2.3";

/// Id of the container element the SDK requires as the first child of
/// the body.
pub const ROOT_ELEMENT_ID: &str = "fb-root";

/// Name the SDK installs its runtime object under.
pub const GLOBAL_NAME: &str = "FB";

/// Facebook provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacebookConfig {
    /// Application id appended to the SDK URL as `appId` when set.
    pub app_id: Option<String>,
}

/// The Facebook provider.
#[derive(Debug, Default)]
pub struct FacebookProvider {
    config: FacebookConfig,
}

impl FacebookProvider {
    /// Creates a provider with the given configuration.
    pub fn new(config: FacebookConfig) -> Self {
        Self { config }
    }

    /// Guarantees the `#fb-root` container exists as the first child of
    /// the body.
    ///
    /// Idempotent: an existing container is left untouched, wherever it
    /// sits. The SDK requires the container to precede other body content,
    /// which is why a fresh one goes in first.
    fn ensure_root_element(document: &Document) -> ProviderResult<()> {
        let mut dom = document.dom_mut();
        if dom.get_element_by_id(ROOT_ELEMENT_ID).is_some() {
            return Ok(());
        }
        let body = dom.body().ok_or(DomError::MissingElement { tag: "body" })?;
        let root = dom.create_element("div");
        dom.set_id(root, ROOT_ELEMENT_ID);
        dom.insert_first(body, root);
        debug!(id = ROOT_ELEMENT_ID, "created sdk root container");
        Ok(())
    }
}

#[async_trait]
impl Provider for FacebookProvider {
    fn name(&self) -> &'static str {
        "facebook"
    }

    fn marker_classes(&self) -> &'static [&'static str] {
        MARKER_CLASSES
    }

    fn script_id(&self) -> &'static str {
        SCRIPT_ID
    }

    fn script_url(&self) -> String {
        match &self.config.app_id {
            Some(app_id) => format!("{SDK_URL}&appId={app_id}"),
            None => SDK_URL.to_string(),
        }
    }

    fn prepare(&self, document: &Arc<Document>) -> ProviderResult<()> {
        Self::ensure_root_element(document)
    }

    async fn on_library_loaded(&self, document: Arc<Document>) {
        document.dispatch(WidgetEvent::FacebookLibraryLoaded);

        // The SDK script installs its runtime under `FB` before the load
        // event fires; without it the render signal cannot be bridged.
        let Some(runtime) = document.globals().get::<FacebookSdk>(GLOBAL_NAME) else {
            debug!(global = GLOBAL_NAME, "sdk runtime not installed, render signal not bridged");
            return;
        };

        let doc = Arc::clone(&document);
        runtime.subscribe(FacebookSignal::XfbmlRender, move || {
            doc.dispatch(WidgetEvent::FacebookLoaded);
        });
    }
}

impl ConfigurableProvider for FacebookProvider {
    type Config = FacebookConfig;

    fn config_key() -> &'static str {
        "facebook"
    }

    fn from_config(config: Self::Config) -> Self {
        Self::new(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
