//! Behavioral tests for `TtlCache` through the public API.
//!
//! Time-dependent tests run on the paused tokio clock, so `sleep` advances
//! time instantly and deterministically.

use std::time::Duration;

use review_cache::{build_key, CacheError, CacheOptions, CacheRegistry, TtlCache};
use serde_json::{json, Value};
use tokio::time::sleep;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn cache(options: CacheOptions) -> TtlCache<Value> {
    TtlCache::new(options).unwrap()
}

// == Expiry ==

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let cache = cache(CacheOptions::default());
    cache.set("k", json!("v"), Some(ms(100))).await.unwrap();

    sleep(ms(99)).await;
    assert_eq!(cache.get("k").await.unwrap(), Some(json!("v")));

    sleep(ms(2)).await;
    assert_eq!(cache.get("k").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_max_age_caps_long_ttl() {
    let cache = cache(CacheOptions::default().with_max_age(ms(100)).with_ttl(ms(50)));
    cache.set("k", json!(1), Some(ms(1000))).await.unwrap();

    sleep(ms(99)).await;
    assert!(cache.has("k").await.unwrap());

    sleep(ms(2)).await;
    assert_eq!(cache.get("k").await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_overwrite_resets_ttl() {
    let cache = cache(CacheOptions::default());
    cache.set("k", json!("v1"), Some(ms(100))).await.unwrap();

    sleep(ms(80)).await;
    cache.set("k", json!("v2"), Some(ms(100))).await.unwrap();

    sleep(ms(80)).await;
    assert_eq!(cache.get("k").await.unwrap(), Some(json!("v2")));
}

#[tokio::test(start_paused = true)]
async fn test_sweep_removes_unread_entries() {
    let cache = cache(CacheOptions::default().with_sweep_interval(ms(50)));
    cache.set("short", json!(1), Some(ms(20))).await.unwrap();
    cache.set("long", json!(2), Some(ms(500))).await.unwrap();

    sleep(ms(60)).await;
    assert_eq!(cache.len().await, 1);

    let stats = cache.stats().await.unwrap();
    assert_eq!(stats.entries[0].key, "long");
    assert_eq!(stats.counters.expirations, 1);
}

// == Eviction ==

#[tokio::test]
async fn test_capacity_evicts_least_recent() {
    let cache = cache(CacheOptions::default().with_max_size(3));
    for key in ["a", "b", "c"] {
        cache.set(key, json!(key), None).await.unwrap();
    }

    cache.set("d", json!("d"), None).await.unwrap();

    assert_eq!(cache.len().await, 3);
    assert!(!cache.has("a").await.unwrap());
    for key in ["b", "c", "d"] {
        assert!(cache.has(key).await.unwrap(), "{} should remain", key);
    }
}

#[tokio::test]
async fn test_read_refreshes_recency() {
    let cache = cache(CacheOptions::default().with_max_size(2));
    cache.set("a", json!(1), None).await.unwrap();
    cache.set("b", json!(2), None).await.unwrap();
    cache.get("a").await.unwrap();

    cache.set("c", json!(3), None).await.unwrap();

    assert!(cache.has("a").await.unwrap());
    assert!(!cache.has("b").await.unwrap());
    assert!(cache.has("c").await.unwrap());
}

#[tokio::test]
async fn test_overwrite_at_capacity_does_not_evict() {
    let cache = cache(CacheOptions::default().with_max_size(2));
    cache.set("a", json!(1), None).await.unwrap();
    cache.set("b", json!(2), None).await.unwrap();

    cache.set("a", json!(10), None).await.unwrap();

    assert_eq!(cache.len().await, 2);
    assert_eq!(cache.stats().await.unwrap().counters.evictions, 0);
}

// == Lifecycle ==

#[tokio::test]
async fn test_destroy_is_idempotent() {
    let cache = cache(CacheOptions::default());
    cache.set("k", json!(1), None).await.unwrap();

    cache.destroy().await;
    assert_eq!(cache.len().await, 0);

    cache.destroy().await;
    assert_eq!(cache.len().await, 0);
    assert!(cache.is_destroyed().await);
}

#[tokio::test]
async fn test_use_after_destroy_is_an_error() {
    let cache = cache(CacheOptions::default());
    let clone = cache.clone();
    cache.destroy().await;

    assert_eq!(clone.get("k").await, Err(CacheError::Destroyed));
    assert_eq!(clone.set("k", json!(1), None).await, Err(CacheError::Destroyed));
    assert!(matches!(clone.stats().await, Err(CacheError::Destroyed)));
}

#[test]
fn test_construction_outside_runtime_fails() {
    let result: Result<TtlCache<Value>, _> = TtlCache::new(CacheOptions::default());
    assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_invalid_options_rejected() {
    let result: Result<TtlCache<Value>, _> =
        TtlCache::new(CacheOptions::default().with_max_size(0));
    assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
}

// == Keys ==

#[test]
fn test_key_is_order_independent() {
    let a = build_key("listings", &json!({"b": 2, "a": 1})).unwrap();
    let b = build_key("listings", &json!({"a": 1, "b": 2})).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_invalid_keys_rejected() {
    let cache = cache(CacheOptions::default());
    assert!(matches!(
        cache.set("", json!(1), None).await,
        Err(CacheError::InvalidKey(_))
    ));
    assert!(matches!(
        cache.set("k", json!(1), Some(Duration::ZERO)).await,
        Err(CacheError::InvalidTtl(_))
    ));
}

// == Invalidation ==

#[tokio::test]
async fn test_clear_forces_recompute() {
    let caches = CacheRegistry::new(Duration::from_secs(3600), Duration::from_secs(300)).unwrap();
    let key = build_key("reviews", &json!({})).unwrap();
    assert_eq!(key, "reviews:{}");

    caches.reviews.set(key.as_str(), json!({"total": 5}), None).await.unwrap();
    assert!(caches.reviews.has(&key).await.unwrap());

    caches.invalidate_review_data().await.unwrap();

    assert_eq!(caches.reviews.get(&key).await.unwrap(), None);
    caches.destroy_all().await;
}

// == Stats ==

#[tokio::test]
async fn test_stats_hit_accounting() {
    let cache = cache(CacheOptions::default());
    cache.set("x", json!(1), None).await.unwrap();
    for _ in 0..3 {
        cache.get("x").await.unwrap();
    }

    let stats = cache.stats().await.unwrap();
    assert_eq!(stats.size, 1);
    assert_eq!(stats.entries[0].key, "x");
    assert_eq!(stats.entries[0].hits, 3);
    assert_eq!(stats.hit_rate, 3.0);
}

#[tokio::test]
async fn test_absent_key_is_a_miss() {
    let cache = cache(CacheOptions::default());

    assert_eq!(cache.get("never-set").await.unwrap(), None);
    assert_eq!(cache.stats().await.unwrap().counters.misses, 1);
}
