//! Cache Store Module
//!
//! Single-threaded cache engine: HashMap storage with recency-ordered eviction
//! and lazy TTL expiration. `TtlCache` wraps it for shared use.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::{
    CacheCounters, CacheEntry, CacheStats, EntrySnapshot, RecencyIndex, MAX_KEY_LENGTH,
};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Capacity-bounded map from string keys to expiring values.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Access order for eviction
    recency: RecencyIndex,
    /// Lifetime counters
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL for entries stored without an explicit one
    default_ttl: Duration,
    /// Absolute ceiling on entry age, regardless of TTL
    max_age: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store. Arguments are assumed validated by the caller.
    pub fn new(max_size: usize, default_ttl: Duration, max_age: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyIndex::new(),
            counters: CacheCounters::default(),
            max_size,
            default_ttl,
            max_age,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and resetting
    /// its age and hit count.
    ///
    /// When the store is full and `key` is new, the least recently accessed
    /// entry is evicted first.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<()> {
        validate_key(&key)?;

        let ttl = match ttl {
            Some(ttl) if ttl.is_zero() => {
                return Err(CacheError::InvalidTtl("TTL must be positive".to_string()));
            }
            Some(ttl) => ttl,
            None => self.default_ttl,
        };
        if ttl > self.max_age {
            warn!(
                key = %key,
                ttl_ms = ttl.as_millis() as u64,
                max_age_ms = self.max_age.as_millis() as u64,
                "TTL exceeds max age, entry will expire at max age"
            );
        }

        let previous_seq = self.entries.get(&key).map(|entry| entry.access_seq);
        if previous_seq.is_none() && self.entries.len() >= self.max_size {
            self.evict_least_recent();
        }

        let seq = self.recency.record(&key, previous_seq);
        let entry = CacheEntry::new(value, ttl, Instant::now(), seq);
        self.entries.insert(key, entry);

        Ok(())
    }

    // == Get ==
    /// Returns a clone of the live value under `key`.
    ///
    /// A stale entry is removed and reported as a miss, exactly as if it
    /// had never been stored.
    pub fn get(&mut self, key: &str) -> Result<Option<V>> {
        validate_key(key)?;
        Ok(self.touch_live(key).map(|entry| entry.value.clone()))
    }

    // == Has ==
    /// Same as `get` without cloning the value; still counts as an access.
    pub fn has(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.touch_live(key).is_some())
    }

    // == Delete ==
    /// Removes `key`, returning whether an entry was present.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.remove_entry(key).is_some())
    }

    // == Clear ==
    /// Removes every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    // == Purge Stale ==
    /// Removes every entry past its TTL or the max age.
    ///
    /// Returns the number of entries removed.
    pub fn purge_stale(&mut self) -> usize {
        let now = Instant::now();
        let stale_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_live(now, self.max_age))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale_keys {
            self.remove_entry(key);
        }
        self.counters.record_expirations(stale_keys.len());

        stale_keys.len()
    }

    // == Stats ==
    /// Returns a diagnostic snapshot of the store.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let snapshots = self
            .entries
            .iter()
            .map(|(key, entry)| EntrySnapshot {
                key: key.clone(),
                age: entry.age(now),
                hits: entry.hit_count,
                ttl: entry.ttl,
            })
            .collect();

        CacheStats::from_snapshots(snapshots, self.max_size, self.counters)
    }

    // == Reset ==
    /// Removes every entry and zeroes the counters.
    pub fn reset(&mut self) {
        self.clear();
        self.counters = CacheCounters::default();
    }

    // == Length ==
    /// Returns the current number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Looks up a live entry and records the access, dropping it if stale.
    fn touch_live(&mut self, key: &str) -> Option<&CacheEntry<V>> {
        let now = Instant::now();
        let live = match self.entries.get(key) {
            Some(entry) => entry.is_live(now, self.max_age),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if !live {
            debug!(key = %key, "Cache entry expired on read");
            self.remove_entry(key);
            self.counters.record_expirations(1);
            self.counters.record_miss();
            return None;
        }

        self.counters.record_hit();
        let entry = self.entries.get_mut(key)?;
        let seq = self.recency.record(key, Some(entry.access_seq));
        entry.touch(now, seq);
        Some(&*entry)
    }

    /// Single removal path shared by delete, lazy expiry, the sweep and eviction.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.recency.forget(entry.access_seq);
        Some(entry)
    }

    fn evict_least_recent(&mut self) {
        if let Some(key) = self.recency.peek_least_recent().map(str::to_string) {
            self.remove_entry(&key);
            self.counters.record_eviction();
            debug!(key = %key, "Evicted least recently accessed entry");
        }
    }
}

// == Key Validation ==
/// Rejects empty keys and keys longer than `MAX_KEY_LENGTH` bytes.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}
