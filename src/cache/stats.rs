//! Cache Statistics Module
//!
//! Tracks per-region cache performance metrics.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics for one region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Calls that skipped the lookup because the caller asked for fresh data
    pub bypasses: u64,
    /// Entries evicted due to LRU policy
    pub evictions: u64,
    /// Current number of entries in the region
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_bypass(&mut self) {
        self.bypasses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        assert_eq!(CacheStats::new(), CacheStats::default());
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_bypasses_do_not_affect_hit_rate() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_bypass();
        stats.record_bypass();
        assert_eq!(stats.bypasses, 2);
        assert_eq!(stats.hit_rate(), 1.0);
    }
}
