//! # Solder Providers
//!
//! The three built-in widget providers for the Solder loader, plus the
//! models of each provider's native signal surface — the slice of the
//! external SDK this system consumes.
//!
//! ## Providers
//!
//! | provider | markup | script id | prerequisite |
//! |---|---|---|---|
//! | [`FacebookProvider`] | `fb-*` widget classes | `facebook-jssdk` | `#fb-root` as first child of body |
//! | [`GooglePlusProvider`] | `g-*` widget classes | `googleplus-js` | none |
//! | [`TwitterProvider`] | `twitter-*-button` classes | `twitter-wjs` | ready-queue under the `twttr` global |
//!
//! ## Native signal surfaces
//!
//! Each provider's external script exposes its own signaling once loaded;
//! the embedder (or a test) stands in for that script:
//!
//! - [`FacebookSdk`] models `FB.Event.subscribe` — install it under the
//!   `FB` global and `emit` the render signal.
//! - [`TwttrRuntime`] + [`ReadyQueue`] model `twttr.ready` /
//!   `twttr.events.bind` — drain the queue with a runtime handle and
//!   `emit` loaded/rendered signals.
//!
//! ```rust,ignore
//! // Embedder side, once the Facebook SDK resource actually arrives:
//! let sdk = FacebookSdk::install(&document);
//! loader.complete(&document, facebook::SCRIPT_ID).await;
//! sdk.emit(FacebookSignal::XfbmlRender); // -> "facebook:loaded" on the document
//! ```

pub mod facebook;
pub mod googleplus;
pub mod twitter;

pub use facebook::{FacebookConfig, FacebookProvider, FacebookSdk, FacebookSignal};
pub use googleplus::{GooglePlusConfig, GooglePlusProvider};
pub use twitter::{
    ReadyQueue, TwitterConfig, TwitterEvent, TwitterProvider, TwitterSignal, TwttrRuntime,
};
