//! Pending Request Table
//!
//! Book-keeping for in-flight lookups: at most one pending request per key,
//! each holding the waiters enqueued while its fetch is outstanding.

use std::collections::HashMap;

use tokio::sync::oneshot;

/// Channel over which a queued caller receives the shared outcome.
pub(crate) type Waiter<V, E> = oneshot::Sender<Result<V, E>>;

// == Pending Table ==
/// Maps each key with an outstanding fetch to its FIFO waiter list.
///
/// A pending request is created the moment a miss triggers a fetch and
/// destroyed the instant that fetch settles; it never outlives one fetch
/// cycle.
pub(crate) struct PendingTable<V, E> {
    requests: HashMap<String, Vec<Waiter<V, E>>>,
}

impl<V, E> PendingTable<V, E> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            requests: HashMap::new(),
        }
    }

    // == Contains ==
    /// Returns true if a fetch for `key` is outstanding.
    pub fn contains(&self, key: &str) -> bool {
        self.requests.contains_key(key)
    }

    // == Begin ==
    /// Registers a pending request for `key` with an empty waiter list; the
    /// registering caller is the leader and receives the outcome directly.
    pub fn begin(&mut self, key: &str) {
        let prior = self.requests.insert(key.to_owned(), Vec::new());
        debug_assert!(prior.is_none(), "one pending request per key");
    }

    // == Join ==
    /// Appends a waiter to the pending request for `key`.
    ///
    /// Returns false if no fetch is outstanding for `key`; the caller must
    /// then lead its own fetch.
    pub fn join(&mut self, key: &str, waiter: Waiter<V, E>) -> bool {
        match self.requests.get_mut(key) {
            Some(waiters) => {
                waiters.push(waiter);
                true
            }
            None => false,
        }
    }

    // == Settle ==
    /// Discards the pending request for `key`, handing back its waiters in
    /// enqueue order for fan-out.
    pub fn settle(&mut self, key: &str) -> Vec<Waiter<V, E>> {
        self.requests.remove(key).unwrap_or_default()
    }

    // == Length ==
    /// Number of keys with an outstanding fetch.
    pub fn len(&self) -> usize {
        self.requests.len()
    }
}
