//! Response DTOs for the employee proxy API
//!
//! Defines the structure of outgoing HTTP response bodies that are not
//! employees themselves.

use serde::Serialize;

use crate::cache::{CacheSnapshot, CacheStats, Region};

/// Per-region entry of the cache stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct RegionStatsResponse {
    /// Region name
    pub region: &'static str,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of calls that skipped the lookup on request
    pub bypasses: u64,
    /// Number of LRU evictions
    pub evictions: u64,
    /// Current number of entries in the region
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl RegionStatsResponse {
    pub fn new(region: Region, stats: &CacheStats) -> Self {
        Self {
            region: region.name(),
            hits: stats.hits,
            misses: stats.misses,
            bypasses: stats.bypasses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the cache stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// One entry per region, in fixed region order
    pub regions: Vec<RegionStatsResponse>,
    /// Number of full invalidations since startup
    pub invalidations: u64,
}

impl From<CacheSnapshot> for StatsResponse {
    fn from(snapshot: CacheSnapshot) -> Self {
        Self {
            regions: snapshot
                .regions
                .iter()
                .map(|(region, stats)| RegionStatsResponse::new(*region, stats))
                .collect(),
            invalidations: snapshot.invalidations,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Generic error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
