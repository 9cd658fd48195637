//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::CachedValue;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored operation result
    pub value: CachedValue,
    /// Insertion timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds); TTL is absolute from insertion
    pub expires_at: u64,
    /// Number of times this entry has been served
    pub access_count: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after now.
    pub fn new(value: CachedValue, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);

        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            access_count: 0,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time,
    /// so a zero TTL is expired immediately.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Record Access ==
    /// Returns a copy of the value and counts the access.
    pub fn read(&mut self) -> CachedValue {
        self.access_count += 1;
        self.value.clone()
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    #[cfg(test)]
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
