//! Expired-Entry Purge Task
//!
//! Background task that periodically removes expired entries from a shared
//! standalone store.
//!
//! Expiry is authoritative on access: `get` drops a stale entry the moment it
//! is touched. This sweep exists for stores whose keys are read rarely, so
//! stale entries do not sit in memory until the next lookup.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// The task runs in an infinite loop, sleeping for the configured interval
/// between sweeps. It takes a write lock on the store only for the duration
/// of each sweep.
///
/// # Arguments
/// * `store` - Shared store to sweep
/// * `interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during shutdown.
pub fn spawn_purge_task<V>(
    store: Arc<RwLock<CacheStore<V>>>,
    interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting expired-entry purge task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store = store.write().await;
                store.purge_expired()
            };

            if removed > 0 {
                info!(removed, "purged expired entries");
            } else {
                debug!("no expired entries to purge");
            }
        }
    })
}
