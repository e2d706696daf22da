//! Ready-queue handoff to the widgets script.
//!
//! The external script, once it executes, drains whatever queue already
//! exists under the `twttr` global and invokes each buffered callback
//! with its runtime handle. The queue therefore has to be installed
//! *before* the script element is injected.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::native::TwttrRuntime;

/// Callback registered before the widgets runtime exists.
pub type ReadyCallback = Box<dyn FnOnce(&Arc<TwttrRuntime>) + Send>;

enum QueueState {
    /// The runtime has not arrived; callbacks are buffered.
    Buffering(Vec<ReadyCallback>),
    /// The runtime arrived; late registrations run immediately.
    Drained(Arc<TwttrRuntime>),
}

/// Buffers ready callbacks until the widgets runtime drains the queue.
pub struct ReadyQueue {
    state: Mutex<QueueState>,
}

impl ReadyQueue {
    /// Creates an empty, buffering queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::Buffering(Vec::new())),
        }
    }

    /// Registers a callback to run once the runtime is available.
    ///
    /// Before the drain the callback is buffered; afterwards it runs
    /// immediately with the retained handle, matching what the real
    /// widgets script does for late registrations.
    pub fn ready(&self, callback: ReadyCallback) {
        let immediate = {
            let mut state = self.state.lock();
            match &mut *state {
                QueueState::Buffering(buffer) => {
                    buffer.push(callback);
                    None
                }
                QueueState::Drained(runtime) => Some((callback, Arc::clone(runtime))),
            }
        };
        if let Some((callback, runtime)) = immediate {
            callback(&runtime);
        }
    }

    /// Drains the queue with the runtime handle, invoking every buffered
    /// callback in registration order.
    ///
    /// Called by the external script (or whatever stands in for it) once
    /// the runtime exists. A second drain replaces the retained handle
    /// but finds nothing buffered.
    pub fn drain(&self, runtime: Arc<TwttrRuntime>) {
        let buffered = {
            let mut state = self.state.lock();
            let previous = std::mem::replace(&mut *state, QueueState::Drained(Arc::clone(&runtime)));
            match previous {
                QueueState::Buffering(buffer) => buffer,
                QueueState::Drained(_) => {
                    warn!("ready queue drained twice");
                    Vec::new()
                }
            }
        };
        debug!(callbacks = buffered.len(), "draining ready queue");
        for callback in buffered {
            callback(&runtime);
        }
    }

    /// Returns the number of callbacks waiting for the runtime.
    pub fn pending_count(&self) -> usize {
        match &*self.state.lock() {
            QueueState::Buffering(buffer) => buffer.len(),
            QueueState::Drained(_) => 0,
        }
    }

    /// Returns whether the runtime has already drained the queue.
    pub fn is_drained(&self) -> bool {
        matches!(&*self.state.lock(), QueueState::Drained(_))
    }
}

impl Default for ReadyQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn callbacks_buffer_until_the_drain() {
        let queue = ReadyQueue::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&fired);
        queue.ready(Box::new(move |_runtime| {
            f.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(queue.pending_count(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        queue.drain(Arc::new(TwttrRuntime::new()));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(queue.is_drained());
    }

    #[test]
    fn late_registration_runs_immediately_with_the_retained_handle() {
        let queue = ReadyQueue::new();
        queue.drain(Arc::new(TwttrRuntime::new()));

        let fired = Arc::new(AtomicUsize::new(0));
        let f = Arc::clone(&fired);
        queue.ready(Box::new(move |_runtime| {
            f.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(queue.pending_count(), 0);
    }

    #[test]
    fn drain_preserves_registration_order() {
        let queue = ReadyQueue::new();
        let order: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));

        for label in [1u8, 2, 3] {
            let sink = Arc::clone(&order);
            queue.ready(Box::new(move |_runtime| {
                sink.lock().push(label);
            }));
        }

        queue.drain(Arc::new(TwttrRuntime::new()));
        assert_eq!(order.lock().as_slice(), &[1, 2, 3]);
    }
}
