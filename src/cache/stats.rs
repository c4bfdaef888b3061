//! Cache Statistics Module
//!
//! Diagnostic snapshots of a cache's contents and lifetime counters.

use std::time::Duration;

use serde::{Serialize, Serializer};

// == Entry Snapshot ==
/// Point-in-time view of one entry, for diagnostics only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySnapshot {
    pub key: String,
    /// Time since the entry was stored (serialized as milliseconds)
    #[serde(serialize_with = "as_millis")]
    pub age: Duration,
    /// Successful reads since the entry was stored
    pub hits: u64,
    /// Per-entry TTL (serialized as milliseconds)
    #[serde(serialize_with = "as_millis")]
    pub ttl: Duration,
}

// == Cache Counters ==
/// Lifetime operation counters of a cache instance.
///
/// Unlike the per-entry hit counts these survive overwrites, eviction and
/// `clear`, but they are reset by `destroy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that found nothing live
    pub misses: u64,
    /// Entries removed to make room
    pub evictions: u64,
    /// Entries removed because they outlived their TTL or max age
    pub expirations: u64,
}

impl CacheCounters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}

// == Cache Stats ==
/// Snapshot returned by `TtlCache::stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Capacity of the cache
    pub max_size: usize,
    /// Average hits per stored entry: the sum of every entry's hit count
    /// divided by `size`, 0 when empty.
    ///
    /// This is not a hit/miss ratio over time; see `counters` for that.
    pub hit_rate: f64,
    /// Entries sorted by hits, most-hit first
    pub entries: Vec<EntrySnapshot>,
    /// Lifetime counters
    pub counters: CacheCounters,
}

impl CacheStats {
    // == Constructor ==
    /// Builds stats from per-entry snapshots, computing `hit_rate` and the
    /// descending-by-hits order. Equal hit counts are ordered by key.
    pub fn from_snapshots(
        mut entries: Vec<EntrySnapshot>,
        max_size: usize,
        counters: CacheCounters,
    ) -> Self {
        entries.sort_by(|a, b| b.hits.cmp(&a.hits).then_with(|| a.key.cmp(&b.key)));

        let size = entries.len();
        let total_hits: u64 = entries.iter().map(|e| e.hits).sum();
        let hit_rate = if size == 0 {
            0.0
        } else {
            total_hits as f64 / size as f64
        };

        Self {
            size,
            max_size,
            hit_rate,
            entries,
            counters,
        }
    }

    // == Request Hit Ratio ==
    /// Hits over all reads since construction, 0 when nothing was read.
    pub fn request_hit_ratio(&self) -> f64 {
        let total = self.counters.hits + self.counters.misses;
        if total == 0 {
            0.0
        } else {
            self.counters.hits as f64 / total as f64
        }
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
