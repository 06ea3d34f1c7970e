//! Cache Store Module
//!
//! Main cache engine combining a key index with recency tracking and TTL
//! expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyList};
use crate::config::Config;

// == Cache Store ==
/// Capacity-bounded key/value store with LRU eviction and lazy TTL expiry.
///
/// Entries live in a [`RecencyList`]; a `HashMap` maps each key to its list
/// handle. The list head is the most recently touched entry, the tail the
/// least recently touched and therefore the eviction candidate.
///
/// Recency policy: only `set` (insert or update) promotes an entry to the
/// head. A plain `get` returns the value and counts the hit but leaves the
/// eviction order untouched.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to list-handle index
    index: HashMap<String, usize>,
    /// Recency-ordered entries
    list: RecencyList<CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed; 0 disables caching entirely
    capacity: usize,
    /// Entry lifetime; None = entries never expire
    ttl: Option<Duration>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; 0 disables caching
    /// * `ttl_seconds` - Entry lifetime in whole seconds; 0 disables expiry
    pub fn new(capacity: usize, ttl_seconds: u64) -> Self {
        Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
            ttl: (ttl_seconds > 0).then(|| Duration::from_secs(ttl_seconds)),
        }
    }

    /// Creates a CacheStore from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity_entries, config.ttl_seconds)
    }

    // == Get ==
    /// Retrieves an independently owned copy of the value stored under `key`.
    ///
    /// An entry whose TTL has elapsed is removed on access and reported as a
    /// miss. A live entry has its hit counter incremented; its position in
    /// the recency order does not change.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let handle = match self.index.get(key) {
            Some(&handle) => handle,
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        let expired = self
            .list
            .get(handle)
            .map(CacheEntry::is_expired)
            .unwrap_or(false);
        if expired {
            self.list.unlink(handle);
            self.index.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.index.len());
            debug!(key, "entry expired on access");
            return None;
        }

        let entry = self.list.get_mut(handle)?;
        entry.hits += 1;
        let value = entry.value.clone();
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// An existing key is overwritten in place: its value is replaced, its
    /// expiry recomputed from now, its hit counter preserved, and it moves to
    /// the head of the recency order. A new key evicts the tail entry first
    /// when the store is at capacity. With capacity 0 this is a no-op.
    pub fn set(&mut self, key: &str, value: V) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&handle) = self.index.get(key) {
            if let Some(entry) = self.list.get_mut(handle) {
                entry.refresh(value, self.ttl);
            }
            self.list.move_to_front(handle);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_tail();
        }

        let entry = CacheEntry::new(key.to_owned(), value, self.ttl);
        let handle = self.list.push_front(entry);
        self.index.insert(key.to_owned(), handle);
        self.stats.set_total_entries(self.index.len());
    }

    // == Remove ==
    /// Removes an entry by key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let handle = self.index.remove(key)?;
        let entry = self.list.unlink(handle);
        debug_assert!(entry.is_some());
        self.stats.set_total_entries(self.index.len());
        entry.map(|entry| entry.value)
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were dropped.
    ///
    /// Expiry is normally handled lazily by `get`; this sweep exists for
    /// long-lived stores whose keys are read rarely.
    pub fn purge_expired(&mut self) -> usize {
        let expired: Vec<usize> = self
            .list
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(handle, _)| handle)
            .collect();

        for &handle in &expired {
            if let Some(entry) = self.list.unlink(handle) {
                self.index.remove(&entry.key);
                self.stats.record_expiration();
            }
        }

        self.stats.set_total_entries(self.index.len());
        expired.len()
    }

    // == Eviction ==
    /// Drops the least recently touched entry.
    fn evict_tail(&mut self) {
        let Some(handle) = self.list.back() else {
            return;
        };
        if let Some(entry) = self.list.unlink(handle) {
            self.index.remove(&entry.key);
            self.stats.record_eviction();
            debug!(key = %entry.key, "evicted least recently touched entry");
        }
        self.stats.set_total_entries(self.index.len());
    }

    // == Peeks ==
    /// Key and value of the most recently touched entry, without counting a
    /// hit or disturbing the recency order.
    pub fn peek_front(&self) -> Option<(&str, &V)> {
        let entry = self.list.get(self.list.front()?)?;
        Some((entry.key.as_str(), &entry.value))
    }

    /// Key and value of the least recently touched entry.
    pub fn peek_back(&self) -> Option<(&str, &V)> {
        let entry = self.list.get(self.list.back()?)?;
        Some((entry.key.as_str(), &entry.value))
    }

    /// Hit counter of a key, if present. Does not count as an access.
    pub fn hit_count(&self, key: &str) -> Option<u64> {
        let &handle = self.index.get(key)?;
        self.list.get(handle).map(|entry| entry.hits)
    }

    // == Accessors ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.index.len(), self.list.len());
        self.index.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Configured capacity in entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured entry lifetime; None = entries never expire.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }
}
