//! The shared document: element tree, event bus, global registry.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;

use super::html;
use super::tree::Tree;
use crate::event::{EventBus, WidgetEvent};
use crate::globals::GlobalRegistry;

/// The ambient shared resource every component reads and writes.
///
/// A `Document` bundles the element tree, the document-scoped event bus
/// normalized [`WidgetEvent`]s are dispatched on, and the global registry
/// standing in for the handful of well-known globals external provider
/// scripts interact with (`FB`, `twttr`).
///
/// All interior locks are short-lived and never held across an await;
/// execution is cooperative and event-loop-driven, the locks only make the
/// document shareable as a plain `Arc<Document>`.
pub struct Document {
    tree: RwLock<Tree>,
    events: EventBus,
    globals: GlobalRegistry,
}

impl Document {
    /// Creates an empty document (`html > (head, body)`).
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            tree: RwLock::new(Tree::new()),
            events: EventBus::new(),
            globals: GlobalRegistry::new(),
        })
    }

    /// Ingests an HTML document.
    ///
    /// Only elements are kept; text and comments are discarded. Fragments
    /// are normalized into a full document.
    pub fn from_html(html: &str) -> Arc<Self> {
        Arc::new(Self {
            tree: RwLock::new(html::ingest(html)),
            events: EventBus::new(),
            globals: GlobalRegistry::new(),
        })
    }

    // =========================================================================
    // Tree access
    // =========================================================================

    /// Acquires a read guard on the element tree.
    pub fn dom(&self) -> RwLockReadGuard<'_, Tree> {
        self.tree.read()
    }

    /// Acquires a write guard on the element tree.
    pub fn dom_mut(&self) -> RwLockWriteGuard<'_, Tree> {
        self.tree.write()
    }

    /// Returns whether any element carries at least one of the classes.
    pub fn has_any_class(&self, classes: &[&str]) -> bool {
        self.tree.read().has_any_class(classes)
    }

    /// Returns whether an element with the given id exists.
    pub fn element_exists(&self, id: &str) -> bool {
        self.tree.read().get_element_by_id(id).is_some()
    }

    /// Returns the number of elements in the document.
    pub fn node_count(&self) -> usize {
        self.tree.read().node_count()
    }

    // =========================================================================
    // Events and globals
    // =========================================================================

    /// Dispatches a normalized event on the document.
    pub fn dispatch(&self, event: WidgetEvent) {
        self.events.dispatch(event);
    }

    /// Subscribes to normalized events dispatched after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    /// Returns the document-scoped event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Returns the global registry external scripts look things up in.
    pub fn globals(&self) -> &GlobalRegistry {
        &self.globals
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("node_count", &self.node_count())
            .finish()
    }
}
