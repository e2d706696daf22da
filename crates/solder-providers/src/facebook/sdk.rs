//! Model of the Facebook SDK's event surface.
//!
//! The loader only consumes one slice of the SDK: `FB.Event.subscribe`
//! with the `xfbml.render` signal. [`FacebookSdk`] models that slice so
//! the embedder — whoever actually hosts the external script — can stand
//! in for it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use solder_core::Document;

use super::GLOBAL_NAME;

/// Signals the SDK emits that this system consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacebookSignal {
    /// A widget render pass finished (`xfbml.render`).
    XfbmlRender,
}

impl FacebookSignal {
    /// Returns the SDK's name for the signal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XfbmlRender => "xfbml.render",
        }
    }
}

type SignalCallback = Arc<dyn Fn() + Send + Sync>;

/// The SDK runtime handle, as far as this system is concerned.
///
/// Subscriptions persist for the document's lifetime; every `emit` fires
/// all of them.
#[derive(Default)]
pub struct FacebookSdk {
    subscribers: Mutex<HashMap<FacebookSignal, Vec<SignalCallback>>>,
}

impl FacebookSdk {
    /// Creates a fresh runtime handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle and installs it under the `FB` global, the way
    /// the real SDK script does once it executes.
    pub fn install(document: &Document) -> Arc<Self> {
        let sdk = Arc::new(Self::new());
        document.globals().install(GLOBAL_NAME, Arc::clone(&sdk));
        sdk
    }

    /// Registers a persistent subscriber for a signal.
    pub fn subscribe(&self, signal: FacebookSignal, callback: impl Fn() + Send + Sync + 'static) {
        trace!(signal = signal.as_str(), "sdk subscription registered");
        self.subscribers
            .lock()
            .entry(signal)
            .or_default()
            .push(Arc::new(callback));
    }

    /// Fires all subscribers registered for a signal.
    pub fn emit(&self, signal: FacebookSignal) {
        let subscribers: Vec<SignalCallback> = self
            .subscribers
            .lock()
            .get(&signal)
            .cloned()
            .unwrap_or_default();
        trace!(
            signal = signal.as_str(),
            subscribers = subscribers.len(),
            "sdk signal"
        );
        for subscriber in subscribers {
            subscriber();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn emit_fires_every_subscriber_every_time() {
        let sdk = FacebookSdk::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&count);
        sdk.subscribe(FacebookSignal::XfbmlRender, move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        sdk.emit(FacebookSignal::XfbmlRender);
        sdk.emit(FacebookSignal::XfbmlRender);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn emit_without_subscribers_is_harmless() {
        let sdk = FacebookSdk::new();
        sdk.emit(FacebookSignal::XfbmlRender);
    }

    #[test]
    fn install_places_the_handle_under_the_global_name() {
        let document = Document::new();
        let installed = FacebookSdk::install(&document);

        let found = document.globals().get::<FacebookSdk>(GLOBAL_NAME).unwrap();
        assert!(Arc::ptr_eq(&installed, &found));
    }
}
