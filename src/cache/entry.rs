//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached record together with its bookkeeping metadata.
///
/// The recency links live in the surrounding [`RecencyList`](crate::cache::RecencyList)
/// slots, not here; an entry only knows its key, payload, expiry and hit count.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is indexed under
    pub key: String,
    /// The stored payload
    pub value: V,
    /// Absolute expiry instant, None = never expires
    pub expires_at: Option<Instant>,
    /// Number of times a lookup returned this entry
    pub hits: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// Expiry is fixed at creation time to `now + ttl` on a monotonic clock;
    /// it is never refreshed by subsequent reads.
    pub fn new(key: String, value: V, ttl: Option<Duration>) -> Self {
        Self {
            key,
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
            hits: 0,
        }
    }

    // == Refresh ==
    /// Replaces the payload and recomputes expiry from now.
    ///
    /// The hit counter is preserved; counters reset only when an entry is
    /// destroyed.
    pub fn refresh(&mut self, value: V, ttl: Option<Duration>) {
        self.value = value;
        self.expires_at = ttl.map(|ttl| Instant::now() + ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current instant is
    /// greater than or equal to the expiry instant, so an entry whose TTL has
    /// fully elapsed is immediately unavailable.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Remaining TTL ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// An expired entry reports `Duration::ZERO`.
    pub fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
