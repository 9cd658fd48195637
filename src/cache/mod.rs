//! Cache Module
//!
//! Memoizes read operations per region with TTL expiration, LRU eviction and
//! all-region invalidation on writes.

mod entry;
mod lru;
mod region;
mod stats;
mod store;
mod value;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use region::{Region, RegionStore};
pub use stats::CacheStats;
pub use store::{CacheSnapshot, ResponseCache};
pub use value::{CacheValue, CachedValue};

// == Public Constants ==
/// Default maximum number of entries per region
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default entry TTL in seconds
pub const DEFAULT_TTL_SECS: u64 = 60;
