//! Registry of the cancellation tokens of every outstanding request.
//!
//! A request registers itself before it is dispatched and gets back an
//! [`InFlightGuard`]. Dropping the guard removes the entry, so the entry is
//! gone on every exit path of the request. A sweep ([`InFlightRegistry::cancel_all`])
//! drains the registry under the lock and only then cancels the drained
//! tokens, so each token is cancelled once and the registry is left empty.

#![warn(unused_crate_dependencies)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InFlightRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    entries: HashMap<RequestId, CancellationToken>,
}

/// Slot held by a request while it is in flight
#[derive(Debug)]
pub struct InFlightGuard {
    id: RequestId,
    token: CancellationToken,
    registry: InFlightRegistry,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new entry and returns the guard that owns it
    #[instrument(skip(self))]
    pub fn register(&self) -> InFlightGuard {
        let token = CancellationToken::new();
        let id = {
            let mut inner = self.inner.lock().expect("mutex poisoned");
            inner.next_id += 1;
            let id = RequestId(inner.next_id);
            inner.entries.insert(id, token.clone());
            id
        };
        debug!(%id, "request registered");
        InFlightGuard {
            id,
            token,
            registry: self.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("mutex poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: RequestId) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .entries
            .contains_key(&id)
    }

    /// Cancels every registered request and empties the registry.
    ///
    /// Returns the number of requests cancelled
    #[instrument(skip(self), ret)]
    pub fn cancel_all(&self) -> usize {
        self.sweep(None)
    }

    /// Empties the registry and cancels every request other than `keep`.
    ///
    /// `keep` is the request doing the sweep, its entry is removed without
    /// being cancelled. Returns the number of requests cancelled
    #[instrument(skip(self), ret)]
    pub fn cancel_all_except(&self, keep: RequestId) -> usize {
        self.sweep(Some(keep))
    }

    fn sweep(&self, keep: Option<RequestId>) -> usize {
        // Snapshot taken under the lock, cancellation happens after it is released
        let snapshot: Vec<(RequestId, CancellationToken)> = self
            .inner
            .lock()
            .expect("mutex poisoned")
            .entries
            .drain()
            .collect();
        let mut cancelled = 0;
        for (id, token) in snapshot {
            if Some(id) == keep {
                continue;
            }
            token.cancel();
            cancelled += 1;
        }
        cancelled
    }

    fn remove(&self, id: RequestId) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .entries
            .remove(&id)
            .is_some()
    }
}

impl InFlightGuard {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes once the request has been cancelled by a sweep
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let was_present = self.registry.remove(self.id);
        debug!(id = %self.id, was_present, "request left the registry");
    }
}
