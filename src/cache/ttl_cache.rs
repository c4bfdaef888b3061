//! TTL Cache Module
//!
//! Thread-safe handle around `CacheStore` that owns the background sweep.
//!
//! Every operation takes the lock once and performs no I/O while holding it,
//! so each call (including the evict-then-insert step of `set`) is atomic.
//! There is no single-flight: concurrent misses on one key each recompute
//! the value and the last `set` wins.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

/// Store slot shared with the sweep task. `None` once destroyed.
pub(crate) type SharedStore<V> = Arc<RwLock<Option<CacheStore<V>>>>;

// == Cache Options ==
/// Construction-time policy of a `TtlCache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Lifetime of entries stored without an explicit TTL
    pub ttl: Duration,
    /// Maximum number of entries
    pub max_size: usize,
    /// Absolute ceiling on entry age
    pub max_age: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_size: 1000,
            max_age: Duration::from_secs(60 * 60),
            sweep_interval: Duration::from_secs(5 * 60),
        }
    }
}

impl CacheOptions {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    // == Validate ==
    /// Rejects zero durations, zero capacity and a default TTL above `max_age`.
    pub fn validate(&self) -> Result<()> {
        if self.ttl.is_zero() {
            return Err(CacheError::InvalidConfig("ttl must be positive".to_string()));
        }
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be at least 1".to_string(),
            ));
        }
        if self.max_age.is_zero() {
            return Err(CacheError::InvalidConfig(
                "max_age must be positive".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep_interval must be positive".to_string(),
            ));
        }
        if self.ttl > self.max_age {
            return Err(CacheError::InvalidConfig(format!(
                "ttl ({:?}) must not exceed max_age ({:?})",
                self.ttl, self.max_age
            )));
        }
        Ok(())
    }
}

// == TTL Cache ==
/// Shared, capacity-bounded TTL cache. Clones refer to the same cache.
///
/// States: active until `destroy` is called, destroyed afterwards. A
/// destroyed cache answers every operation except `destroy`, `len` and
/// `is_destroyed` with `CacheError::Destroyed`.
pub struct TtlCache<V> {
    inner: Arc<Inner<V>>,
}

struct Inner<V> {
    name: String,
    options: CacheOptions,
    store: SharedStore<V>,
    sweep: Mutex<Option<JoinHandle<()>>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Drop for Inner<V> {
    fn drop(&mut self) {
        if let Ok(sweep) = self.sweep.get_mut() {
            if let Some(handle) = sweep.take() {
                handle.abort();
            }
        }
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its sweep.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(options: CacheOptions) -> Result<Self> {
        Self::with_name("cache", options)
    }

    /// Like `new`, with a name used in log output.
    pub fn with_name(name: impl Into<String>, options: CacheOptions) -> Result<Self> {
        options.validate()?;
        if Handle::try_current().is_err() {
            return Err(CacheError::InvalidConfig(
                "cache must be created inside a tokio runtime".to_string(),
            ));
        }

        let name = name.into();
        let store: SharedStore<V> = Arc::new(RwLock::new(Some(CacheStore::new(
            options.max_size,
            options.ttl,
            options.max_age,
        ))));
        let sweep = spawn_sweep_task(name.clone(), Arc::downgrade(&store), options.sweep_interval);

        debug!(
            cache = %name,
            ttl_ms = options.ttl.as_millis() as u64,
            max_size = options.max_size,
            "Cache created"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                name,
                options,
                store,
                sweep: Mutex::new(Some(sweep)),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn options(&self) -> &CacheOptions {
        &self.inner.options
    }

    // == Set ==
    /// Stores `value` under `key` with `ttl`, or the default TTL when `None`.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        let key = key.into();
        self.with_store(|store| store.set(key, value, ttl)).await
    }

    // == Get ==
    /// Returns the live value under `key`, `None` on a miss.
    pub async fn get(&self, key: &str) -> Result<Option<V>> {
        self.with_store(|store| store.get(key)).await
    }

    // == Has ==
    /// `true` when `get` would hit. Records the access like `get` does.
    pub async fn has(&self, key: &str) -> Result<bool> {
        self.with_store(|store| store.has(key)).await
    }

    // == Delete ==
    /// Removes `key`, returning whether it was present.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.with_store(|store| store.delete(key)).await
    }

    // == Clear ==
    /// Removes every entry; the cache stays usable.
    pub async fn clear(&self) -> Result<()> {
        self.with_store(|store| {
            store.clear();
            Ok(())
        })
        .await
    }

    // == Stats ==
    pub async fn stats(&self) -> Result<CacheStats> {
        let guard = self.inner.store.read().await;
        guard
            .as_ref()
            .map(CacheStore::stats)
            .ok_or(CacheError::Destroyed)
    }

    // == Length ==
    /// Number of stored entries, including stale ones the sweep has not
    /// reached yet. 0 once destroyed.
    pub async fn len(&self) -> usize {
        self.inner
            .store
            .read()
            .await
            .as_ref()
            .map_or(0, CacheStore::len)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn is_destroyed(&self) -> bool {
        self.inner.store.read().await.is_none()
    }

    // == Destroy ==
    /// Stops the sweep and drops every entry. Calling it again is a no-op.
    pub async fn destroy(&self) {
        let handle = match self.inner.sweep.lock() {
            Ok(mut sweep) => sweep.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            handle.abort();
        }

        let mut guard = self.inner.store.write().await;
        if let Some(mut store) = guard.take() {
            store.reset();
            info!(cache = %self.inner.name, "Cache destroyed");
        }
    }

    async fn with_store<R>(&self, f: impl FnOnce(&mut CacheStore<V>) -> Result<R>) -> Result<R> {
        let mut guard = self.inner.store.write().await;
        match guard.as_mut() {
            Some(store) => f(store),
            None => Err(CacheError::Destroyed),
        }
    }
}
