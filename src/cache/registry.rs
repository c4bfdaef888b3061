//! Cache Registry Module
//!
//! The fixed set of named caches fronting the dashboard's read endpoints.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{CacheOptions, CacheStats, TtlCache};
use crate::config::Config;
use crate::error::Result;

// == Cache Policy ==
/// Default TTL and capacity of one named cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub name: &'static str,
    pub ttl: Duration,
    pub max_size: usize,
}

impl CachePolicy {
    /// Listing summaries
    pub const LISTINGS: CachePolicy = CachePolicy {
        name: "listings",
        ttl: Duration::from_secs(5 * 60),
        max_size: 500,
    };

    /// Filtered review pages; short-lived because moderation changes them
    pub const REVIEWS: CachePolicy = CachePolicy {
        name: "reviews",
        ttl: Duration::from_secs(2 * 60),
        max_size: 1000,
    };

    /// Aggregate review statistics
    pub const STATS: CachePolicy = CachePolicy {
        name: "stats",
        ttl: Duration::from_secs(10 * 60),
        max_size: 100,
    };

    /// Per-property detail pages
    pub const PROPERTY_DETAIL: CachePolicy = CachePolicy {
        name: "property_detail",
        ttl: Duration::from_secs(15 * 60),
        max_size: 200,
    };

    pub const ALL: [CachePolicy; 4] = [
        Self::LISTINGS,
        Self::REVIEWS,
        Self::STATS,
        Self::PROPERTY_DETAIL,
    ];

    /// Cache options for this policy under the process-wide limits.
    pub fn options(&self, max_age: Duration, sweep_interval: Duration) -> CacheOptions {
        CacheOptions {
            ttl: self.ttl,
            max_size: self.max_size,
            max_age,
            sweep_interval,
        }
    }
}

// == Cache Registry ==
/// One `TtlCache` per resource class, living for the whole process.
///
/// Writes invalidate coarsely: every cache whose values derive from review
/// data is cleared before the write handler responds.
#[derive(Clone)]
pub struct CacheRegistry {
    pub listings: TtlCache<Value>,
    pub reviews: TtlCache<Value>,
    pub stats: TtlCache<Value>,
    pub property_detail: TtlCache<Value>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates all caches. Must be called inside a tokio runtime.
    pub fn new(max_age: Duration, sweep_interval: Duration) -> Result<Self> {
        let build = |policy: CachePolicy| {
            TtlCache::with_name(policy.name, policy.options(max_age, sweep_interval))
        };

        Ok(Self {
            listings: build(CachePolicy::LISTINGS)?,
            reviews: build(CachePolicy::REVIEWS)?,
            stats: build(CachePolicy::STATS)?,
            property_detail: build(CachePolicy::PROPERTY_DETAIL)?,
        })
    }

    /// Creates all caches with the limits from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.cache_max_age),
            Duration::from_secs(config.sweep_interval),
        )
    }

    /// Every cache, in `CachePolicy::ALL` order.
    pub fn all(&self) -> [&TtlCache<Value>; 4] {
        [
            &self.listings,
            &self.reviews,
            &self.stats,
            &self.property_detail,
        ]
    }

    // == Invalidate ==
    /// Clears every cache derived from review data. Called after a review
    /// mutation succeeds and before its response is sent.
    ///
    /// The caches are cleared one after another, not atomically as a group.
    pub async fn invalidate_review_data(&self) -> Result<()> {
        for cache in self.all() {
            cache.clear().await?;
        }
        debug!("Invalidated review-derived caches");
        Ok(())
    }

    // == Stats ==
    /// Stats of every cache keyed by cache name.
    pub async fn all_stats(&self) -> Result<BTreeMap<String, CacheStats>> {
        let mut all = BTreeMap::new();
        for cache in self.all() {
            all.insert(cache.name().to_string(), cache.stats().await?);
        }
        Ok(all)
    }

    // == Destroy ==
    /// Stops every sweep and drops every entry.
    pub async fn destroy_all(&self) {
        for cache in self.all() {
            cache.destroy().await;
        }
        info!("All caches destroyed");
    }
}
