//! Runtime orchestration.
//!
//! The [`SolderRuntime`] owns the shared document, the script loader, and
//! an ordered list of providers. Activation runs each provider's markup
//! detection in registration order; providers with markup present get
//! their prerequisites established and their script requested, with event
//! normalization wired up as the load continuation. Providers whose
//! markup is absent are never touched.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use solder_runtime::SolderRuntime;
//!
//! let runtime = SolderRuntime::new(Document::from_html(&page_html));
//! runtime.register_provider::<FacebookProvider>()?;
//! let activation = runtime.activate().await;
//!
//! // Embedder side: report the native load signal when the resource
//! // actually finishes.
//! runtime.script_loaded("facebook-jssdk").await;
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use solder_core::{
    BoxedProvider, ConfigurableProvider, Document, LoadState, MarkupDetector, ScriptLoader,
    ScriptRequest, WidgetEvent,
};

use crate::config::{ConfigLoader, ConfigResult, SolderConfig};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

/// The runtime that orchestrates widget providers for one document.
pub struct SolderRuntime {
    /// The configuration.
    config: SolderConfig,
    /// The shared document.
    document: Arc<Document>,
    /// The script loader guarding per-id idempotence.
    loader: Arc<ScriptLoader>,
    /// Registered providers, in activation order.
    providers: RwLock<Vec<BoxedProvider>>,
}

impl SolderRuntime {
    /// Creates a runtime with automatic configuration loading.
    ///
    /// Searches the current directory (and the user config directory) for
    /// `solder.toml` / `solder.yaml`; falls back to defaults when nothing
    /// is found.
    pub fn new(document: Arc<Document>) -> Self {
        let config = ConfigLoader::new()
            .with_current_dir()
            .load()
            .unwrap_or_else(|e| {
                eprintln!("Warning: failed to load config ({e}), using defaults");
                SolderConfig::default()
            });

        Self::from_config(document, &config)
    }

    /// Creates a runtime builder for custom configuration.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Creates a runtime from configuration.
    ///
    /// Initializes logging from the configuration (a no-op when a
    /// subscriber is already set).
    pub fn from_config(document: Arc<Document>, config: &SolderConfig) -> Self {
        logging::init_from_config(&config.logging);

        info!(
            log_level = %config.logging.level,
            providers_configured = config.providers.len(),
            "runtime initialized from configuration"
        );

        Self {
            config: config.clone(),
            document,
            loader: Arc::new(ScriptLoader::new()),
            providers: RwLock::new(Vec::new()),
        }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &SolderConfig {
        &self.config
    }

    /// Returns the shared document.
    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Returns the script loader.
    pub fn loader(&self) -> &Arc<ScriptLoader> {
        &self.loader
    }

    /// Subscribes to normalized events dispatched on the document.
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.document.subscribe()
    }

    // =========================================================================
    // Provider Management
    // =========================================================================

    /// Registers a provider, constructing it from its configuration
    /// section.
    ///
    /// Looks up the provider's entry under `providers.<config_key>`; a
    /// missing entry means the default configuration. Registration order
    /// is activation order.
    pub fn register_provider<P>(&self) -> RuntimeResult<()>
    where
        P: ConfigurableProvider + 'static,
    {
        let key = P::config_key();

        let config: P::Config = if let Some(value) = self.config.providers.get(key) {
            value.clone().deserialize().map_err(|e| {
                RuntimeError::ProviderConfigDeserialize(format!(
                    "failed to deserialize config for provider '{key}': {e}"
                ))
            })?
        } else {
            Default::default()
        };

        let provider: BoxedProvider = Arc::new(P::from_config(config));
        self.providers.write().push(provider);
        info!(provider = key, "registered provider");
        Ok(())
    }

    /// Returns the names of the registered providers, in activation order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.read().iter().map(|p| p.name()).collect()
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Runs detection and setup for every registered provider, in order.
    ///
    /// For each provider whose markup is present: establish prerequisites,
    /// then request its script with event normalization as the load
    /// continuation. Absent markup skips the provider entirely; a script
    /// id already known to the loader is not requested again. Per-provider
    /// failures are logged and do not stop the sweep.
    pub async fn activate(&self) -> Activation {
        let providers: Vec<BoxedProvider> = self.providers.read().clone();
        let detector = MarkupDetector::new(Arc::clone(&self.document));
        let mut activation = Activation::default();

        for provider in providers {
            let name = provider.name();

            if !detector.any_present(provider.marker_classes()) {
                debug!(provider = name, "no widget markup, skipping");
                activation.skipped.push(name);
                continue;
            }

            if self.loader.state(provider.script_id()) != LoadState::NotRequested {
                debug!(provider = name, "script already requested, skipping");
                activation.skipped.push(name);
                continue;
            }

            if let Err(e) = provider.prepare(&self.document) {
                error!(provider = name, error = %e, "provider prerequisite failed");
                activation.failed.push(name);
                continue;
            }

            let request = ScriptRequest::new(provider.script_url(), provider.script_id());
            let continuation = {
                let provider = Arc::clone(&provider);
                Box::new(move |document: Arc<Document>| -> solder_core::BoxFuture<'static, ()> {
                    Box::pin(async move { provider.on_library_loaded(document).await })
                })
            };

            if let Err(e) = self
                .loader
                .load(&self.document, request, Some(continuation))
                .await
            {
                error!(provider = name, error = %e, "script injection failed");
                activation.failed.push(name);
                continue;
            }

            info!(provider = name, "provider activated");
            activation.requested.push(name);
        }

        activation
    }

    /// Reports a script's native load signal to the loader.
    pub async fn script_loaded(&self, id: &str) {
        self.loader.complete(&self.document, id).await;
    }
}

/// Summary of one activation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activation {
    /// Providers whose scripts were requested this sweep.
    pub requested: Vec<&'static str>,
    /// Providers skipped (no markup, or script already requested).
    pub skipped: Vec<&'static str>,
    /// Providers that failed prerequisite setup or injection.
    pub failed: Vec<&'static str>,
}

impl Activation {
    /// Returns whether the sweep requested nothing.
    pub fn is_empty(&self) -> bool {
        self.requested.is_empty() && self.failed.is_empty()
    }
}

// =============================================================================
// RuntimeBuilder
// =============================================================================

/// Builder for creating a [`SolderRuntime`] with custom configuration.
///
/// ```rust,ignore
/// let runtime = SolderRuntime::builder()
///     .document(Document::from_html(&html))
///     .config_file("config/solder.toml")
///     .profile("production")
///     .build()?;
/// ```
pub struct RuntimeBuilder {
    config_loader: ConfigLoader,
    document: Option<Arc<Document>>,
}

impl RuntimeBuilder {
    /// Creates a new runtime builder.
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new().with_current_dir(),
            document: None,
        }
    }

    /// Sets the document the runtime operates on.
    ///
    /// Defaults to an empty document — useful only for tests, since an
    /// empty document activates nothing.
    pub fn document(mut self, document: Arc<Document>) -> Self {
        self.document = Some(document);
        self
    }

    /// Sets a specific configuration file to load.
    pub fn config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    /// Enables loading environment variables (enabled by default).
    pub fn with_env(mut self) -> Self {
        self.config_loader = self.config_loader.with_env();
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: SolderConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Builds the runtime.
    pub fn build(self) -> ConfigResult<SolderRuntime> {
        let config = self.config_loader.load()?;
        let document = self.document.unwrap_or_else(Document::new);
        Ok(SolderRuntime::from_config(document, &config))
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use solder_providers::facebook::{self, FacebookConfig, FacebookProvider};
    use solder_providers::googleplus::GooglePlusProvider;
    use solder_providers::twitter::{self, ReadyQueue, TwitterEvent, TwitterProvider, TwttrRuntime};
    use tokio::sync::broadcast::error::TryRecvError;

    fn runtime_for(document: Arc<Document>) -> SolderRuntime {
        SolderRuntime::from_config(document, &SolderConfig::default())
    }

    fn register_all(runtime: &SolderRuntime) {
        runtime.register_provider::<FacebookProvider>().unwrap();
        runtime.register_provider::<GooglePlusProvider>().unwrap();
        runtime.register_provider::<TwitterProvider>().unwrap();
    }

    #[tokio::test]
    async fn facebook_only_markup_requests_exactly_one_script() {
        let document = Document::from_html(r#"<body><div class="fb-like"></div></body>"#);
        let runtime = runtime_for(Arc::clone(&document));
        register_all(&runtime);
        let mut events = runtime.subscribe();

        let activation = runtime.activate().await;

        assert_eq!(activation.requested, vec!["facebook"]);
        assert_eq!(activation.skipped, vec!["googleplus", "twitter"]);
        assert_eq!(document.dom().elements_by_tag("script").len(), 1);

        // Simulated load completion: libraryLoaded fires exactly once,
        // and no Google+/Twitter event ever does.
        runtime.script_loaded(facebook::SCRIPT_ID).await;
        assert_eq!(events.try_recv().unwrap(), WidgetEvent::FacebookLibraryLoaded);
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn googleplus_and_twitter_markup_leaves_facebook_untouched() {
        let document = Document::from_html(
            r##"<body>
                <span class="g-follow"></span>
                <a class="twitter-share-button" href="#">share</a>
            </body>"##,
        );
        let runtime = runtime_for(Arc::clone(&document));
        register_all(&runtime);

        let activation = runtime.activate().await;

        assert_eq!(activation.requested, vec!["googleplus", "twitter"]);
        assert!(!document.element_exists(facebook::ROOT_ELEMENT_ID));
        assert_eq!(document.dom().elements_by_tag("script").len(), 2);
        assert!(!document.globals().contains(facebook::GLOBAL_NAME));
    }

    #[tokio::test]
    async fn empty_document_with_no_config_mutates_nothing() {
        let document = Document::new();
        let runtime = runtime_for(Arc::clone(&document));
        register_all(&runtime);
        let mut events = runtime.subscribe();

        let nodes_before = document.node_count();
        let activation = runtime.activate().await;

        assert!(activation.is_empty());
        assert_eq!(document.node_count(), nodes_before);
        assert_eq!(events.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn facebook_app_id_propagates_into_the_injected_url() {
        let document = Document::from_html(r#"<body><div class="fb-page"></div></body>"#);

        let mut config = SolderConfig::default();
        config.providers.insert(
            "facebook".into(),
            figment::value::Value::serialize(FacebookConfig {
                app_id: Some("123".into()),
            })
            .unwrap(),
        );

        let runtime = SolderRuntime::from_config(Arc::clone(&document), &config);
        register_all(&runtime);
        runtime.activate().await;

        let dom = document.dom();
        let script = dom.get_element_by_id(facebook::SCRIPT_ID).unwrap();
        let src = dom.element(script).attribute("src").unwrap();
        assert!(src.contains("appId=123"));
    }

    #[tokio::test]
    async fn facebook_url_has_no_app_id_when_unconfigured() {
        let document = Document::from_html(r#"<body><div class="fb-page"></div></body>"#);
        let runtime = runtime_for(Arc::clone(&document));
        register_all(&runtime);
        runtime.activate().await;

        let dom = document.dom();
        let script = dom.get_element_by_id(facebook::SCRIPT_ID).unwrap();
        assert!(!dom.element(script).attribute("src").unwrap().contains("appId"));
    }

    #[tokio::test]
    async fn reactivation_requests_nothing_new() {
        let document = Document::from_html(r#"<body><div class="fb-send"></div></body>"#);
        let runtime = runtime_for(Arc::clone(&document));
        register_all(&runtime);

        let first = runtime.activate().await;
        let second = runtime.activate().await;

        assert_eq!(first.requested, vec!["facebook"]);
        assert!(second.requested.is_empty());
        assert_eq!(document.dom().elements_by_tag("script").len(), 1);
        assert_eq!(document.dom().elements_by_id("fb-root").len(), 1);
    }

    #[tokio::test]
    async fn twitter_signals_flow_end_to_end() {
        let document = Document::from_html(
            r##"<body><a class="twitter-follow-button" href="#">follow</a></body>"##,
        );
        let runtime = runtime_for(Arc::clone(&document));
        register_all(&runtime);
        let mut events = runtime.subscribe();

        runtime.activate().await;
        runtime.script_loaded(twitter::SCRIPT_ID).await;
        assert_eq!(events.try_recv().unwrap(), WidgetEvent::TwitterLibraryLoaded);

        // The external script finds the queue under `twttr` and drains it.
        let queue = document
            .globals()
            .get::<ReadyQueue>(twitter::GLOBAL_NAME)
            .unwrap();
        let native = Arc::new(TwttrRuntime::new());
        queue.drain(Arc::clone(&native));

        native.emit(TwitterEvent::Rendered { target: "#btn1".into() });
        assert_eq!(
            events.try_recv().unwrap(),
            WidgetEvent::TwitterRendered { target: "#btn1".into() }
        );
    }

    #[tokio::test]
    async fn registration_order_is_activation_order() {
        let document = Document::from_html(
            r##"<body>
                <div class="fb-comments"></div>
                <span class="g-plusone"></span>
                <a class="twitter-hashtag-button" href="#">tag</a>
            </body>"##,
        );
        let runtime = runtime_for(Arc::clone(&document));
        register_all(&runtime);

        let activation = runtime.activate().await;
        assert_eq!(activation.requested, vec!["facebook", "googleplus", "twitter"]);
        assert_eq!(runtime.provider_names(), vec!["facebook", "googleplus", "twitter"]);
    }

    #[test]
    fn builder_defaults_to_an_empty_document() {
        let runtime = SolderRuntime::builder().without_env().build().unwrap();
        assert_eq!(runtime.document().node_count(), 3);
        assert!(runtime.provider_names().is_empty());
    }
}
