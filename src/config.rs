//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::resilience::RetryPolicy;

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Root URL of the upstream employee service, e.g. `http://localhost:8112/api/v1`
    pub upstream_base_url: String,
    /// TCP connect timeout for upstream calls, in milliseconds
    pub connect_timeout_ms: u64,
    /// Whole-request timeout for upstream calls, in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum number of entries per cache region
    pub cache_max_entries: usize,
    /// TTL in seconds for every cache entry
    pub cache_ttl_secs: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Total upstream attempts for retry-eligible failures
    pub retry_max_attempts: u32,
    /// Delay before the second attempt, in milliseconds
    pub retry_initial_delay_ms: u64,
    /// Backoff growth factor between attempts
    pub retry_multiplier: f64,
    /// Upper bound for a single backoff delay, in milliseconds
    pub retry_max_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8111)
    /// - `UPSTREAM_BASE_URL` - Upstream root (default: `http://localhost:8112/api/v1`)
    /// - `UPSTREAM_CONNECT_TIMEOUT_MS` - Connect timeout (default: 3000)
    /// - `UPSTREAM_REQUEST_TIMEOUT_MS` - Request timeout (default: 7000)
    /// - `CACHE_MAX_ENTRIES` - Entries per cache region (default: 1000)
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: 60)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 5)
    /// - `RETRY_MAX_ATTEMPTS` - Total attempts (default: 3)
    /// - `RETRY_INITIAL_DELAY_MS` - First backoff (default: 1000)
    /// - `RETRY_MULTIPLIER` - Backoff multiplier (default: 2.0)
    /// - `RETRY_MAX_DELAY_MS` - Backoff cap (default: 5000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            connect_timeout_ms: env_or("UPSTREAM_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
            request_timeout_ms: env_or("UPSTREAM_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl_secs: env_or("CACHE_TTL_SECS", defaults.cache_ttl_secs),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            retry_max_attempts: env_or("RETRY_MAX_ATTEMPTS", defaults.retry_max_attempts),
            retry_initial_delay_ms: env_or(
                "RETRY_INITIAL_DELAY_MS",
                defaults.retry_initial_delay_ms,
            ),
            retry_multiplier: env_or("RETRY_MULTIPLIER", defaults.retry_multiplier),
            retry_max_delay_ms: env_or("RETRY_MAX_DELAY_MS", defaults.retry_max_delay_ms),
        }
    }

    /// Retry schedule derived from the `RETRY_*` settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts,
            initial_delay: Duration::from_millis(self.retry_initial_delay_ms),
            multiplier: self.retry_multiplier,
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8111,
            upstream_base_url: "http://localhost:8112/api/v1".to_string(),
            connect_timeout_ms: 3000,
            request_timeout_ms: 7000,
            cache_max_entries: 1000,
            cache_ttl_secs: 60,
            cleanup_interval: 5,
            retry_max_attempts: 3,
            retry_initial_delay_ms: 1000,
            retry_multiplier: 2.0,
            retry_max_delay_ms: 5000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
