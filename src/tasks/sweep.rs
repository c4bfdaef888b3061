//! Cache Sweep Task
//!
//! Background task that periodically purges stale entries from one cache.

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the sweep loop for a single cache.
///
/// The task only holds a weak reference to the store, so it exits on its
/// own once every `TtlCache` handle is gone. It also exits when the cache
/// has been destroyed. Removal goes through `CacheStore::purge_stale`, the
/// same path lazy expiry uses.
///
/// # Arguments
/// * `name` - Cache name used in log output
/// * `store` - Weak reference to the cache's store slot
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle that `TtlCache::destroy` aborts.
pub(crate) fn spawn_sweep_task<V>(
    name: String,
    store: Weak<RwLock<Option<CacheStore<V>>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        debug!(
            cache = %name,
            interval_ms = interval.as_millis() as u64,
            "Starting cache sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(shared) = store.upgrade() else {
                debug!(cache = %name, "Cache dropped, stopping sweep task");
                break;
            };

            let removed = {
                let mut guard = shared.write().await;
                match guard.as_mut() {
                    Some(cache) => cache.purge_stale(),
                    None => {
                        debug!(cache = %name, "Cache destroyed, stopping sweep task");
                        break;
                    }
                }
            };

            if removed > 0 {
                info!(cache = %name, removed, "Cache sweep removed stale entries");
            } else {
                debug!(cache = %name, "Cache sweep found no stale entries");
            }
        }
    })
}
