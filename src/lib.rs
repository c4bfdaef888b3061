//! Review Cache - A review dashboard API fronted by in-process TTL caches
//!
//! Provides `TtlCache` (TTL expiry, max-age ceiling, least-recently-accessed
//! eviction, periodic sweep), a canonical cache-key builder, and a registry of
//! named caches that review mutations invalidate.

pub mod api;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
mod tasks;

pub use api::{create_router, AppState};
pub use cache::{build_key, CacheOptions, CacheRegistry, CacheStats, TtlCache};
pub use config::Config;
pub use data::ReviewStore;
pub use error::{ApiError, CacheError};
