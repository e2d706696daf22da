//! Model of the Twitter widgets runtime's event surface.
//!
//! Once `widgets.js` executes it hands a runtime object to every buffered
//! ready callback; the slice this system consumes is `twttr.events.bind`
//! with the `loaded` and `rendered` signals. [`TwttrRuntime`] models that
//! slice so the embedder can stand in for the external script.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

/// Signal kinds the widgets runtime emits that this system consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwitterSignal {
    /// All widgets on the page finished loading.
    Loaded,
    /// A single widget finished rendering.
    Rendered,
}

impl TwitterSignal {
    /// Returns the runtime's name for the signal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Rendered => "rendered",
        }
    }
}

/// A native event emitted by the widgets runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum TwitterEvent {
    /// Widgets finished loading; carries the widget list.
    Loaded {
        /// The widgets reported by the runtime.
        widgets: Vec<String>,
    },
    /// A widget finished rendering; carries the render target.
    Rendered {
        /// The target the runtime reports (e.g. a selector).
        target: String,
    },
}

impl TwitterEvent {
    /// Returns the signal kind this event belongs to.
    pub fn signal(&self) -> TwitterSignal {
        match self {
            Self::Loaded { .. } => TwitterSignal::Loaded,
            Self::Rendered { .. } => TwitterSignal::Rendered,
        }
    }
}

type TwitterListener = Arc<dyn Fn(&TwitterEvent) + Send + Sync>;

/// The widgets runtime handle, as far as this system is concerned.
///
/// Listeners persist for the document's lifetime and may fire any number
/// of times.
#[derive(Default)]
pub struct TwttrRuntime {
    listeners: Mutex<HashMap<TwitterSignal, Vec<TwitterListener>>>,
}

impl TwttrRuntime {
    /// Creates a fresh runtime handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a persistent listener for a signal kind.
    pub fn bind(
        &self,
        signal: TwitterSignal,
        listener: impl Fn(&TwitterEvent) + Send + Sync + 'static,
    ) {
        trace!(signal = signal.as_str(), "widgets runtime listener bound");
        self.listeners
            .lock()
            .entry(signal)
            .or_default()
            .push(Arc::new(listener));
    }

    /// Emits a native event to all listeners bound to its signal kind.
    pub fn emit(&self, event: TwitterEvent) {
        let listeners: Vec<TwitterListener> = self
            .listeners
            .lock()
            .get(&event.signal())
            .cloned()
            .unwrap_or_default();
        trace!(
            signal = event.signal().as_str(),
            listeners = listeners.len(),
            "widgets runtime signal"
        );
        for listener in listeners {
            listener(&event);
        }
    }
}
