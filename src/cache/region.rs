//! Cache Region Module
//!
//! One independently bounded key/value store per read operation, combining
//! HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use super::{CacheEntry, CacheStats, CachedValue, LruTracker};

// == Region ==
/// Cache partition, one per read operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Full roster, singleton key
    ListAll,
    /// Name search, keyed by lower-cased search string
    Search,
    /// Single employee, keyed by id
    ById,
    /// Highest salary, singleton key
    HighestSalary,
    /// Top ten earners' names, singleton key
    TopEarners,
}

impl Region {
    /// Every region, in a fixed order.
    pub const ALL: [Region; 5] = [
        Region::ListAll,
        Region::Search,
        Region::ById,
        Region::HighestSalary,
        Region::TopEarners,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::ListAll => "employees",
            Region::Search => "employeeSearch",
            Region::ById => "employeeById",
            Region::HighestSalary => "highestSalary",
            Region::TopEarners => "top10HighestEarningEmployeeNames",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

// == Region Store ==
/// Storage for a single region with LRU eviction and TTL support.
#[derive(Debug)]
pub struct RegionStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied to every insert
    ttl: Duration,
}

impl RegionStore {
    // == Constructor ==
    /// Creates a new region holding at most `max_entries` (minimum 1), each
    /// living for `ttl`.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    // == Insert ==
    /// Stores a value, resetting its TTL if the key already exists.
    ///
    /// If the region is at capacity, the least recently used entry is evicted.
    pub fn insert(&mut self, key: &str, value: CachedValue) {
        let is_overwrite = self.entries.contains_key(key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
                debug!("Evicted least recently used key '{}'", evicted_key);
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, self.ttl));
        self.lru.touch(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` for a missing or expired key; expired entries are
    /// removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<CachedValue> {
        let expired = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.read();
                self.stats.record_hit();
                self.lru.touch(key);
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove(key);
        }
        self.stats.record_miss();
        None
    }

    /// Counts a lookup skipped on caller request.
    pub fn record_bypass(&mut self) {
        self.stats.record_bypass();
    }

    // == Remove ==
    /// Removes an entry by key, returning whether one existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        existed
    }

    // == Clear ==
    /// Drops every entry, returning how many there were. Statistics survive.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove(key);
        }
        expired_keys.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}
