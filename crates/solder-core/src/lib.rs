//! # Solder Core
//!
//! The core engine of the Solder social-widget loader.
//!
//! Solder inspects a loaded document for third-party widget markup
//! (Facebook, Google+, Twitter), injects each matching provider's external
//! script at most once, and republishes that provider's disparate native
//! load/render signals as a small uniform set of document-scoped events.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌──────────────┐
//! │   Runtime    │────▶│ MarkupDetector │     │   Document   │
//! │ (per page)   │     └────────────────┘     │  tree+events │
//! │              │────▶│  ScriptLoader  │────▶│  +globals    │
//! └──────┬───────┘     └───────┬────────┘     └──────▲───────┘
//!        │ prepare / normalize │ load continuation   │ dispatch
//!        ▼                     ▼                     │
//! ┌─────────────────────────────────────────────────┐│
//! │ Provider (facebook / googleplus / twitter)      │┘
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! - [`Document`] — the ambient shared resource: an in-memory element tree,
//!   the document-scoped [`EventBus`], and the [`GlobalRegistry`] external
//!   provider scripts look things up in.
//! - [`MarkupDetector`] — answers "does any element carry one of these
//!   marker classes" with a pure read of the current tree.
//! - [`ScriptLoader`] — idempotent script injection keyed by script id,
//!   with completion callbacks as async continuations.
//! - [`Provider`] — one implementation per third-party widget system,
//!   owning its marker classes, script URL, DOM prerequisites, and the
//!   translation of native signals into [`WidgetEvent`]s.
//!
//! ## Example
//!
//! ```rust,ignore
//! use solder_core::{Document, MarkupDetector, ScriptLoader, ScriptRequest};
//!
//! let document = Document::from_html("<div class=\"fb-like\"></div>");
//! let detector = MarkupDetector::new(document.clone());
//! assert!(detector.any_present(&["fb-like"]));
//!
//! let loader = ScriptLoader::new();
//! loader.load(&document, ScriptRequest::new(url, "facebook-jssdk"), None).await?;
//! // ... later, when the embedder observes the resource finishing:
//! loader.complete(&document, "facebook-jssdk").await;
//! ```

pub mod detect;
pub mod dom;
pub mod error;
pub mod event;
pub mod globals;
pub mod loader;
pub mod provider;

pub use detect::MarkupDetector;
pub use dom::{Document, NodeId, Tree};
pub use error::{DomError, DomResult, ProviderError, ProviderResult};
pub use event::{EventBus, WidgetEvent};
pub use globals::GlobalRegistry;
pub use loader::{LoadCallback, LoadState, ScriptLoader, ScriptRequest};
pub use provider::{BoxedProvider, ConfigurableProvider, Provider};

/// Boxed future type used for loader continuations.
pub use futures::future::BoxFuture;

/// Prelude for common imports.
pub mod prelude {
    pub use super::{
        BoxedProvider, Document, DomError, DomResult, EventBus, LoadState, MarkupDetector,
        Provider, ProviderError, ProviderResult, ScriptLoader, ScriptRequest, WidgetEvent,
    };
}
