//! Normalized document events.
//!
//! Each provider's native signaling is translated into a fixed set of
//! document-scoped events. The set is closed by contract — six events,
//! two of them carrying payloads — so the surface is a plain enum rather
//! than a type-erased hierarchy, and downstream consumers observe it over
//! a broadcast subscription.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the document event channel.
///
/// A receiver that lags more than this many events behind misses the
/// oldest ones (broadcast semantics); document events are fire-and-observe
/// so no replay is attempted.
const EVENT_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// Events
// =============================================================================

/// A normalized widget event dispatched on the document.
///
/// Event names follow the `provider:event` convention of the emitted
/// surface: [`WidgetEvent::name`] returns the wire name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WidgetEvent {
    /// The Facebook SDK finished loading.
    FacebookLibraryLoaded,
    /// The Facebook SDK finished rendering widgets (fires per render).
    FacebookLoaded,
    /// The Google+ platform script finished loading.
    GooglePlusLibraryLoaded,
    /// The Twitter widgets script finished loading.
    TwitterLibraryLoaded,
    /// Twitter widgets finished loading; carries the widget list.
    TwitterLoaded {
        /// Widgets reported by the native `loaded` signal.
        widgets: Vec<String>,
    },
    /// A Twitter widget finished rendering; carries the render target.
    TwitterRendered {
        /// Target reported by the native `rendered` signal.
        target: String,
    },
}

impl WidgetEvent {
    /// Returns the document-level event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FacebookLibraryLoaded => "facebook:libraryLoaded",
            Self::FacebookLoaded => "facebook:loaded",
            Self::GooglePlusLibraryLoaded => "googleplus:libraryLoaded",
            Self::TwitterLibraryLoaded => "twitter:libraryLoaded",
            Self::TwitterLoaded { .. } => "twitter:loaded",
            Self::TwitterRendered { .. } => "twitter:rendered",
        }
    }

    /// Returns the provider the event originates from.
    pub fn provider(&self) -> &'static str {
        match self {
            Self::FacebookLibraryLoaded | Self::FacebookLoaded => "facebook",
            Self::GooglePlusLibraryLoaded => "googleplus",
            Self::TwitterLibraryLoaded | Self::TwitterLoaded { .. } | Self::TwitterRendered { .. } => {
                "twitter"
            }
        }
    }
}

// =============================================================================
// Event Bus
// =============================================================================

/// Document-scoped dispatcher for [`WidgetEvent`]s.
///
/// Dispatch is synchronous; consumption is a broadcast subscription, so
/// events can be awaited or polled (`try_recv`) from any task. Dispatching
/// with no live receivers is not an error — events are fire-and-observe.
pub struct EventBus {
    sender: broadcast::Sender<WidgetEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Dispatches an event to all current subscribers.
    pub fn dispatch(&self, event: WidgetEvent) {
        debug!(event = event.name(), provider = event.provider(), "dispatching document event");
        let _ = self.sender.send(event);
    }

    /// Subscribes to events dispatched after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
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
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn names_follow_the_provider_event_convention() {
        assert_eq!(WidgetEvent::FacebookLibraryLoaded.name(), "facebook:libraryLoaded");
        assert_eq!(WidgetEvent::FacebookLoaded.name(), "facebook:loaded");
        assert_eq!(WidgetEvent::GooglePlusLibraryLoaded.name(), "googleplus:libraryLoaded");
        assert_eq!(WidgetEvent::TwitterLibraryLoaded.name(), "twitter:libraryLoaded");
        assert_eq!(WidgetEvent::TwitterLoaded { widgets: vec![] }.name(), "twitter:loaded");
        assert_eq!(
            WidgetEvent::TwitterRendered { target: "#btn1".into() }.name(),
            "twitter:rendered"
        );
    }

    #[test]
    fn subscribers_receive_dispatched_events() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        bus.dispatch(WidgetEvent::GooglePlusLibraryLoaded);

        assert_eq!(receiver.try_recv().unwrap(), WidgetEvent::GooglePlusLibraryLoaded);
        assert_eq!(receiver.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn dispatch_without_subscribers_is_not_an_error() {
        let bus = EventBus::new();
        bus.dispatch(WidgetEvent::TwitterLibraryLoaded);
    }

    #[test]
    fn payloads_travel_with_the_event() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        bus.dispatch(WidgetEvent::TwitterRendered { target: "#btn1".into() });

        match receiver.try_recv().unwrap() {
            WidgetEvent::TwitterRendered { target } => assert_eq!(target, "#btn1"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
