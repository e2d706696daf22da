//! # Solder
//!
//! Loads third-party social-widget libraries only when their markup is
//! actually present.
//!
//! Given a document, Solder detects which providers' widget markup exists
//! (Facebook, Google+, Twitter), injects each matching provider's script
//! exactly once, and republishes the providers' disparate native signals
//! as a uniform set of document events:
//!
//! | event | fired |
//! |---|---|
//! | `facebook:libraryLoaded` | once, on SDK script completion |
//! | `facebook:loaded` | per SDK render pass |
//! | `googleplus:libraryLoaded` | once, on platform script completion |
//! | `twitter:libraryLoaded` | once, on widgets script completion |
//! | `twitter:loaded` | per native `loaded` signal, with the widget list |
//! | `twitter:rendered` | per native `rendered` signal, with the target |
//!
//! Providers whose markup is absent are never touched: no prerequisite
//! elements, no script requests, no events. A script that never finishes
//! loading stays silent — there is no retry and no error surface.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solder::prelude::*;
//!
//! let document = Document::from_html(&page_html);
//! let runtime = solder::attach(Arc::clone(&document), &SolderConfig::default()).await?;
//!
//! let mut events = runtime.subscribe();
//! // Embedder side: report native load signals as resources finish.
//! runtime.script_loaded("facebook-jssdk").await;
//! assert_eq!(events.try_recv()?.name(), "facebook:libraryLoaded");
//! ```

pub use solder_core as core;
pub use solder_providers as providers;
pub use solder_runtime as runtime;

pub use solder_core::{
    Document, DomError, EventBus, GlobalRegistry, LoadState, MarkupDetector, Provider,
    ProviderError, ScriptLoader, ScriptRequest, WidgetEvent,
};
pub use solder_providers::{
    FacebookConfig, FacebookProvider, FacebookSdk, FacebookSignal, GooglePlusProvider, ReadyQueue,
    TwitterEvent, TwitterProvider, TwitterSignal, TwttrRuntime,
};
pub use solder_runtime::{Activation, RuntimeResult, SolderConfig, SolderRuntime};

use std::sync::Arc;

/// Attaches Solder to a document: registers the three built-in providers
/// in their fixed order (Facebook, Google+, Twitter) and activates.
///
/// Detection, prerequisites, and script requests all happen here as a
/// side effect; the returned runtime is the handle for load signals and
/// event subscriptions. Passing a default configuration is equivalent to
/// passing none at all.
pub async fn attach(
    document: Arc<Document>,
    config: &SolderConfig,
) -> RuntimeResult<SolderRuntime> {
    let runtime = SolderRuntime::from_config(document, config);
    runtime.register_provider::<FacebookProvider>()?;
    runtime.register_provider::<GooglePlusProvider>()?;
    runtime.register_provider::<TwitterProvider>()?;
    runtime.activate().await;
    Ok(runtime)
}

/// Prelude for common imports.
pub mod prelude {
    pub use solder_core::prelude::*;
    pub use solder_runtime::{Activation, SolderConfig, SolderRuntime};

    pub use super::attach;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn attach_activates_in_the_fixed_provider_order() {
        let document = Document::from_html(
            r##"<body>
                <div class="fb-like"></div>
                <span class="g-hangout"></span>
                <a class="twitter-mention-button" href="#">mention</a>
            </body>"##,
        );

        let runtime = attach(Arc::clone(&document), &SolderConfig::default())
            .await
            .unwrap();

        assert_eq!(
            runtime.provider_names(),
            vec!["facebook", "googleplus", "twitter"]
        );
        assert_eq!(document.dom().elements_by_tag("script").len(), 3);
    }

    #[tokio::test]
    async fn attach_to_a_bare_document_is_a_no_op() {
        let document = Document::from_html("<body><p>no widgets here</p></body>");
        let runtime = attach(Arc::clone(&document), &SolderConfig::default())
            .await
            .unwrap();
        let mut events = runtime.subscribe();

        assert_eq!(document.dom().elements_by_tag("script").len(), 0);
        assert!(!document.element_exists("fb-root"));
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn full_facebook_flow_through_the_public_surface() {
        let document = Document::from_html(r#"<body><div class="fb-comments"></div></body>"#);
        let runtime = attach(Arc::clone(&document), &SolderConfig::default())
            .await
            .unwrap();
        let mut events = runtime.subscribe();

        // Embedder side: the SDK script executes (installing its runtime
        // object), then the load event fires.
        let sdk = FacebookSdk::install(runtime.document());
        runtime.script_loaded(providers::facebook::SCRIPT_ID).await;

        assert_eq!(events.try_recv().unwrap(), WidgetEvent::FacebookLibraryLoaded);

        sdk.emit(FacebookSignal::XfbmlRender);
        assert_eq!(events.try_recv().unwrap(), WidgetEvent::FacebookLoaded);
    }
}
