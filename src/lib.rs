//! Lookup Cache - in-memory caching for slow asynchronous lookups
//!
//! Provides a capacity-bounded, TTL-expiring store with least-recently-used
//! eviction, and a single-flight coalescing layer that guarantees at most
//! one outstanding upstream fetch per key under concurrent callers.
//!
//! The intended entry point is [`Coalescer::resolve`]; [`CacheStore`] is
//! usable standalone. Cache keys are opaque strings built by the caller;
//! disjoint operation kinds should use disjoint key prefixes.

pub mod cache;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStats, CacheStore};
pub use coalesce::Coalescer;
pub use config::Config;
pub use error::ResolveError;
pub use tasks::spawn_purge_task;
