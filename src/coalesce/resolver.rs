//! Coalescer
//!
//! Single-flight front end over the cache store: concurrent resolves for the
//! same key share one upstream fetch, and the one outcome is fanned out to
//! every caller in arrival order.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, trace};

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::ResolveError;

use super::pending::PendingTable;

// == Coalescer ==
/// Deduplicating cache front end for slow asynchronous lookups.
///
/// One lock guards the store and the pending table together, so each logical
/// step (hit, join, register, settle) is atomic. The lock is never held
/// across an await; the upstream fetch for one key therefore never blocks
/// resolves for other keys.
///
/// Cloning is cheap and every clone drives the same cache and pending table.
pub struct Coalescer<V, E> {
    inner: Arc<Mutex<Inner<V, E>>>,
}

struct Inner<V, E> {
    store: CacheStore<V>,
    pending: PendingTable<V, E>,
}

/// What the registration step decided for one resolve call.
enum Role<V, E> {
    /// Cached value, returned without an upstream call
    Hit(V),
    /// A fetch is already outstanding; wait for its outcome
    Waiter(oneshot::Receiver<Result<V, E>>),
    /// This caller registered the pending request and runs the fetch
    Leader,
}

impl<V, E> Clone for Coalescer<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, E> Coalescer<V, E>
where
    V: Clone,
    E: Clone,
{
    // == Constructors ==
    /// Creates a Coalescer with a store built from `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_store(CacheStore::from_config(config))
    }

    /// Creates a Coalescer over an existing store.
    pub fn with_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                store,
                pending: PendingTable::new(),
            })),
        }
    }

    // == Resolve ==
    /// Resolves `key`, calling `fetch` at most once across all concurrent
    /// callers.
    ///
    /// On a cache hit the stored value is returned as an independently owned
    /// copy and no upstream call occurs. On a miss the first caller becomes
    /// the leader: it registers a pending request, runs `fetch` outside the
    /// lock, populates the cache on success and fans the outcome out to every
    /// caller that joined in the meantime, in arrival order. Errors are
    /// propagated to all current waiters and never cached.
    ///
    /// If the leader's future is dropped before the fetch settles, the
    /// pending request is discarded and every queued waiter receives
    /// [`ResolveError::Abandoned`]; the next resolve starts a fresh cycle.
    pub async fn resolve<F, Fut>(&self, key: &str, fetch: F) -> Result<V, ResolveError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let role = {
            let mut inner = self.lock();
            if let Some(value) = inner.store.get(key) {
                trace!(key, "cache hit");
                Role::Hit(value)
            } else if inner.pending.contains(key) {
                let (tx, rx) = oneshot::channel();
                inner.pending.join(key, tx);
                debug!(key, "joined in-flight lookup");
                Role::Waiter(rx)
            } else {
                inner.pending.begin(key);
                debug!(key, "starting upstream lookup");
                Role::Leader
            }
        };

        match role {
            Role::Hit(value) => Ok(value),
            Role::Waiter(rx) => match rx.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(ResolveError::Upstream(err)),
                Err(_) => Err(ResolveError::Abandoned),
            },
            Role::Leader => {
                let mut guard = SettleGuard {
                    inner: Arc::clone(&self.inner),
                    key: key.to_owned(),
                    armed: true,
                };
                let outcome = fetch().await;
                guard.armed = false;
                self.settle(key, outcome)
            }
        }
    }

    // == Settle ==
    /// Applies a settled fetch outcome: populates the cache on success,
    /// discards the pending request and fans the outcome out FIFO.
    fn settle(&self, key: &str, outcome: Result<V, E>) -> Result<V, ResolveError<E>> {
        let waiters = {
            let mut inner = self.lock();
            if let Ok(value) = &outcome {
                inner.store.set(key, value.clone());
            }
            inner.pending.settle(key)
        };

        debug!(
            key,
            waiters = waiters.len(),
            ok = outcome.is_ok(),
            "lookup settled"
        );
        for waiter in waiters {
            // a waiter that went away is not an error for the others
            let _ = waiter.send(outcome.clone());
        }
        outcome.map_err(ResolveError::Upstream)
    }

    // == Introspection ==
    /// Number of keys with an outstanding upstream fetch.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of entries currently cached.
    pub fn cache_len(&self) -> usize {
        self.lock().store.len()
    }

    /// Snapshot of the underlying store's statistics.
    pub fn stats(&self) -> CacheStats {
        self.lock().store.stats()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V, E>> {
        // a poisoning panic cannot leave the maps half-updated: every
        // mutation completes before its guard is released
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Settle Guard ==
/// Discards the pending request if the leader never reaches `settle`.
///
/// Covers the leader future being dropped mid-fetch and panics inside the
/// fetch itself: the entry is removed and the queued waiters' channels close,
/// surfacing [`ResolveError::Abandoned`] on their side. Without this a stuck
/// pending request would deadlock all future callers for the key.
struct SettleGuard<V, E> {
    inner: Arc<Mutex<Inner<V, E>>>,
    key: String,
    armed: bool,
}

impl<V, E> Drop for SettleGuard<V, E> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let waiters = inner.pending.settle(&self.key);
        debug!(key = %self.key, waiters = waiters.len(), "in-flight lookup abandoned");
        // dropping the senders wakes every waiter with a closed channel
    }
}
