//! Cache Module
//!
//! In-memory TTL caches with least-recently-accessed eviction, the canonical
//! key builder, and the registry of named per-resource caches.

mod entry;
mod key;
mod recency;
mod registry;
mod stats;
mod store;
mod ttl_cache;


// Re-export public types
pub use entry::CacheEntry;
pub use key::build_key;
pub use recency::RecencyIndex;
pub use registry::{CachePolicy, CacheRegistry};
pub use stats::{CacheCounters, CacheStats, EntrySnapshot};
pub use store::CacheStore;
pub use ttl_cache::{CacheOptions, TtlCache};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 4096;
