//! Cache Entry Module
//!
//! Defines a single stored value together with its TTL and access metadata.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached value with expiration and access-statistics metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of insertion or last overwrite
    pub stored_at: Instant,
    /// Per-entry time-to-live
    pub ttl: Duration,
    /// Number of successful reads since `stored_at`
    pub hit_count: u64,
    /// Time of the last successful read, `stored_at` until then
    pub last_accessed_at: Instant,
    /// Position in the recency order, see `RecencyIndex`
    pub(crate) access_seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry stored at `now`.
    pub fn new(value: V, ttl: Duration, now: Instant, access_seq: u64) -> Self {
        Self {
            value,
            stored_at: now,
            ttl,
            hit_count: 0,
            last_accessed_at: now,
            access_seq,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    // == Is Live ==
    /// An entry is live while its age is within both its own TTL and the
    /// cache-wide `max_age` ceiling. Both bounds are inclusive.
    pub fn is_live(&self, now: Instant, max_age: Duration) -> bool {
        let age = self.age(now);
        age <= self.ttl && age <= max_age
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self, now: Instant, access_seq: u64) {
        self.hit_count += 1;
        self.last_accessed_at = now;
        self.access_seq = access_seq;
    }

    // == Time To Live ==
    /// Remaining lifetime, taking the `max_age` ceiling into account.
    pub fn ttl_remaining(&self, now: Instant, max_age: Duration) -> Duration {
        self.ttl.min(max_age).saturating_sub(self.age(now))
    }
}
