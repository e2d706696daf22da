//! Idempotent script injection.
//!
//! The loader guarantees at most one injected script element per script id
//! for the lifetime of the document. An explicit per-id [`LoadState`] is
//! the source of truth, consulted before any DOM mutation; the injected
//! element is a side effect of that state, not the other way around. An
//! element that already carries the id — for example a script tag present
//! in ingested HTML — also short-circuits injection.
//!
//! There is no error handling for network failure: if the embedder never
//! reports completion for an injected script, its callbacks stay buffered
//! forever and no failure is surfaced. That silent-failure policy is the
//! contract, not a gap.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::BoxFuture;
use crate::dom::Document;
use crate::error::DomResult;

/// Completion continuation invoked when a script's load signal arrives.
pub type LoadCallback = Box<dyn FnOnce(Arc<Document>) -> BoxFuture<'static, ()> + Send>;

/// Load state of a single script id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No injection has been requested.
    #[default]
    NotRequested,
    /// The element is injected; the load signal has not arrived.
    Requested,
    /// The load signal arrived.
    Loaded,
}

/// A script to inject: source URL plus the unique element id that keys
/// idempotence.
#[derive(Debug, Clone)]
pub struct ScriptRequest {
    /// Full script URL, including protocol.
    pub url: String,
    /// Unique id for the injected element.
    pub id: String,
}

impl ScriptRequest {
    /// Creates a new request.
    pub fn new(url: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id: id.into(),
        }
    }
}

#[derive(Default)]
struct ScriptEntry {
    state: LoadState,
    waiters: Vec<LoadCallback>,
}

/// Injects external scripts into a document, at most once per id.
#[derive(Default)]
pub struct ScriptLoader {
    entries: Mutex<HashMap<String, ScriptEntry>>,
}

impl ScriptLoader {
    /// Creates a new loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the load state recorded for a script id.
    ///
    /// Scripts that pre-existed in ingested markup are not tracked here;
    /// they short-circuit [`load`](Self::load) through the element check.
    pub fn state(&self, id: &str) -> LoadState {
        self.entries
            .lock()
            .get(id)
            .map(|entry| entry.state)
            .unwrap_or_default()
    }

    /// Requests a script, injecting it unless the id is already known.
    ///
    /// When the id was requested before — or an element with that id
    /// already exists in the document — no element is created and the
    /// callback runs immediately. The callback runs in that case even if
    /// the earlier resource has not finished loading: "already requested"
    /// is treated as ready, an approximation downstream consumers depend
    /// on.
    ///
    /// Otherwise the element is created with the id, the URL as its
    /// source, and async/defer execution hints, inserted immediately
    /// before the first existing script element (appended to the head when
    /// the document has none), and the callback is buffered until
    /// [`complete`](Self::complete) reports the load signal.
    pub async fn load(
        &self,
        document: &Arc<Document>,
        request: ScriptRequest,
        callback: Option<LoadCallback>,
    ) -> DomResult<()> {
        let already_requested = {
            let entries = self.entries.lock();
            entries
                .get(&request.id)
                .is_some_and(|entry| entry.state != LoadState::NotRequested)
        } || document.element_exists(&request.id);

        if already_requested {
            debug!(id = %request.id, "script already requested, invoking callback immediately");
            if let Some(callback) = callback {
                callback(Arc::clone(document)).await;
            }
            return Ok(());
        }

        self.inject(document, &request)?;

        let mut entries = self.entries.lock();
        let entry = entries.entry(request.id.clone()).or_default();
        entry.state = LoadState::Requested;
        if let Some(callback) = callback {
            entry.waiters.push(callback);
        }
        info!(id = %request.id, url = %request.url, "script injection requested");
        Ok(())
    }

    /// Reports a script's native load signal.
    ///
    /// Transitions the id to [`LoadState::Loaded`] and runs the buffered
    /// callbacks in registration order. Unknown ids are a logged no-op.
    pub async fn complete(&self, document: &Arc<Document>, id: &str) {
        let waiters = {
            let mut entries = self.entries.lock();
            match entries.get_mut(id) {
                Some(entry) => {
                    entry.state = LoadState::Loaded;
                    std::mem::take(&mut entry.waiters)
                }
                None => {
                    debug!(id, "load signal for unknown script");
                    return;
                }
            }
        };

        debug!(id, waiters = waiters.len(), "script load signal");
        for waiter in waiters {
            waiter(Arc::clone(document)).await;
        }
    }

    fn inject(&self, document: &Document, request: &ScriptRequest) -> DomResult<()> {
        let mut dom = document.dom_mut();
        let script = dom.create_element("script");
        dom.set_id(script, &request.id);
        dom.set_attribute(script, "src", &request.url);
        dom.set_attribute(script, "type", "text/javascript");
        dom.set_attribute(script, "async", "true");
        dom.set_attribute(script, "defer", "true");

        match dom.first_by_tag("script") {
            Some(existing) => dom.insert_before(script, existing)?,
            None => {
                debug!(id = %request.id, "no existing script element, appending to head");
                match dom.head() {
                    Some(head) => dom.append_child(head, script),
                    None => {
                        let root = dom.root();
                        dom.append_child(root, script);
                    }
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
