//! Twitter widgets provider.
//!
//! Twitter needs a two-stage handoff. Before its script is injected, a
//! ready-queue has to exist under the `twttr` global — the external
//! script drains whatever queue it finds the moment it executes. The
//! provider installs the queue, registers one ready callback that binds
//! persistent `loaded`/`rendered` listeners on the runtime handle, and
//! republishes them as `twitter:loaded` (carrying the widget list) and
//! `twitter:rendered` (carrying the render target). Script completion
//! itself dispatches `twitter:libraryLoaded`, independent of the
//! ready/bind wiring.

mod native;
mod queue;

pub use native::{TwitterEvent, TwitterSignal, TwttrRuntime};
pub use queue::{ReadyCallback, ReadyQueue};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use solder_core::{ConfigurableProvider, Document, Provider, ProviderResult, WidgetEvent};

/// Classes that mark Twitter widget markup.
pub const MARKER_CLASSES: &[&str] = &[
    "twitter-follow-button",
    "twitter-share-button",
    "twitter-hashtag-button",
    "twitter-mention-button",
];

/// Id of the injected widgets script element.
pub const SCRIPT_ID: &str = "twitter-wjs";

/// Widgets script endpoint.
pub const WIDGETS_URL: &str = "https://platform.twitter.com/widgets.js";

/// Name the ready-queue (and later the runtime) lives under.
pub const GLOBAL_NAME: &str = "twttr";

/// Twitter provider configuration. No options are recognized.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TwitterConfig {}

/// The Twitter provider.
///
/// The provider's own reference to the ready-queue is authoritative; the
/// copy under the `twttr` global exists only for the external script's
/// benefit.
pub struct TwitterProvider {
    queue: Arc<ReadyQueue>,
}

impl TwitterProvider {
    /// Creates a provider with a fresh ready-queue.
    pub fn new() -> Self {
        Self {
            queue: Arc::new(ReadyQueue::new()),
        }
    }

    /// Returns the provider's ready-queue.
    pub fn queue(&self) -> &Arc<ReadyQueue> {
        &self.queue
    }

    fn bind_runtime_events(&self, document: &Arc<Document>) {
        let doc = Arc::clone(document);
        self.queue.ready(Box::new(move |runtime| {
            let loaded_doc = Arc::clone(&doc);
            runtime.bind(TwitterSignal::Loaded, move |event| {
                if let TwitterEvent::Loaded { widgets } = event {
                    loaded_doc.dispatch(WidgetEvent::TwitterLoaded {
                        widgets: widgets.clone(),
                    });
                }
            });

            let rendered_doc = Arc::clone(&doc);
            runtime.bind(TwitterSignal::Rendered, move |event| {
                if let TwitterEvent::Rendered { target } = event {
                    rendered_doc.dispatch(WidgetEvent::TwitterRendered {
                        target: target.clone(),
                    });
                }
            });
        }));
    }
}

impl Default for TwitterProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for TwitterProvider {
    fn name(&self) -> &'static str {
        "twitter"
    }

    fn marker_classes(&self) -> &'static [&'static str] {
        MARKER_CLASSES
    }

    fn script_id(&self) -> &'static str {
        SCRIPT_ID
    }

    fn script_url(&self) -> String {
        WIDGETS_URL.to_string()
    }

    fn prepare(&self, document: &Arc<Document>) -> ProviderResult<()> {
        if document.globals().contains(GLOBAL_NAME) {
            debug!(global = GLOBAL_NAME, "ready queue already installed");
            return Ok(());
        }
        document
            .globals()
            .install(GLOBAL_NAME, Arc::clone(&self.queue));
        self.bind_runtime_events(document);
        Ok(())
    }

    async fn on_library_loaded(&self, document: Arc<Document>) {
        document.dispatch(WidgetEvent::TwitterLibraryLoaded);
    }
}

impl ConfigurableProvider for TwitterProvider {
    type Config = TwitterConfig;

    fn config_key() -> &'static str {
        "twitter"
    }

    fn from_config(_config: Self::Config) -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn prepare_installs_the_queue_before_injection() {
        let document = Document::new();
        let provider = TwitterProvider::new();

        provider.prepare(&document).unwrap();

        let installed = document.globals().get::<ReadyQueue>(GLOBAL_NAME).unwrap();
        assert!(Arc::ptr_eq(&installed, provider.queue()));
        // The provider's own binding is already buffered.
        assert_eq!(provider.queue().pending_count(), 1);
    }

    #[test]
    fn prepare_is_idempotent() {
        let document = Document::new();
        let provider = TwitterProvider::new();

        provider.prepare(&document).unwrap();
        provider.prepare(&document).unwrap();

        assert_eq!(provider.queue().pending_count(), 1);
    }

    #[test]
    fn rendered_signal_republishes_with_target() {
        let document = Document::new();
        let mut events = document.subscribe();
        let provider = TwitterProvider::new();
        provider.prepare(&document).unwrap();

        // The external script drains the queue with its runtime handle...
        let runtime = Arc::new(TwttrRuntime::new());
        provider.queue().drain(Arc::clone(&runtime));

        // ...which later emits a rendered signal.
        runtime.emit(TwitterEvent::Rendered { target: "#btn1".into() });

        assert_eq!(
            events.try_recv().unwrap(),
            WidgetEvent::TwitterRendered { target: "#btn1".into() }
        );
    }

    #[test]
    fn loaded_signal_republishes_with_widget_list() {
        let document = Document::new();
        let mut events = document.subscribe();
        let provider = TwitterProvider::new();
        provider.prepare(&document).unwrap();

        let runtime = Arc::new(TwttrRuntime::new());
        provider.queue().drain(Arc::clone(&runtime));

        runtime.emit(TwitterEvent::Loaded {
            widgets: vec!["follow-0".into(), "share-1".into()],
        });
        runtime.emit(TwitterEvent::Loaded { widgets: vec![] });

        assert_eq!(
            events.try_recv().unwrap(),
            WidgetEvent::TwitterLoaded {
                widgets: vec!["follow-0".into(), "share-1".into()],
            }
        );
        // Bindings persist: the second emission republishes too.
        assert_eq!(
            events.try_recv().unwrap(),
            WidgetEvent::TwitterLoaded { widgets: vec![] }
        );
    }

    #[tokio::test]
    async fn library_loaded_is_independent_of_the_ready_wiring() {
        let document = Document::new();
        let mut events = document.subscribe();
        let provider = TwitterProvider::new();

        provider.on_library_loaded(Arc::clone(&document)).await;

        assert_eq!(events.try_recv().unwrap(), WidgetEvent::TwitterLibraryLoaded);
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }
}
