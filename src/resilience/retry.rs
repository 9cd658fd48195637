//! Retry logic with exponential backoff.
//!
//! Only a generic 4xx rejection from the upstream is retried. A 429 becomes
//! [`ProxyError::RateLimited`] on the spot, connection failures and 5xx become
//! [`ProxyError::ServiceUnavailable`] without spending the remaining budget,
//! and 404 becomes [`ProxyError::EmployeeNotFound`].
//!
//! # Example
//!
//! ```
//! use employee_proxy::resilience::RetryPolicy;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::default();
//! assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
//! assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
//! assert_eq!(policy.delay_after(4), Duration::from_millis(5000));
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{ProxyError, Result, UpstreamFailure};

/// Backoff schedule for upstream calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, first call included
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_delay: Duration,
    /// Growth factor applied per failed attempt
    pub multiplier: f64,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    /// 3 attempts, 1s initial delay, doubling, capped at 5s.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            multiplier: 2.0,
            max_delay: Duration::from_millis(5000),
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget with no waiting between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            multiplier: 1.0,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(30) as i32;
        let factor = self.multiplier.max(1.0).powi(exponent);
        let delay = self.initial_delay.as_secs_f64() * factor;
        if !delay.is_finite() || delay >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(delay)
    }
}

/// Runs `call` under `policy`, translating the final failure.
///
/// `operation` names the call in logs and in [`ProxyError::OperationFailed`].
pub async fn with_resilience<F, Fut, T>(
    operation: &str,
    policy: &RetryPolicy,
    mut call: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, UpstreamFailure>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let failure = match call().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("Operation '{}' succeeded on attempt {}", operation, attempt);
                }
                return Ok(value);
            }
            Err(failure) => failure,
        };

        match failure {
            UpstreamFailure::Client {
                status: UpstreamFailure::TOO_MANY_REQUESTS,
                retry_after_secs,
                ..
            } => {
                warn!(
                    "Operation '{}' rate limited by upstream (retry after {:?}s)",
                    operation, retry_after_secs
                );
                return Err(ProxyError::RateLimited { retry_after_secs });
            }
            UpstreamFailure::Client { .. } if attempt < max_attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "Operation '{}' failed (attempt {}/{}): {}. Retrying in {:?}...",
                    operation, attempt, max_attempts, failure, delay
                );
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                attempt += 1;
            }
            UpstreamFailure::NotFound { resource } => {
                warn!("Operation '{}': upstream has no {}", operation, resource);
                return Err(ProxyError::EmployeeNotFound(resource));
            }
            UpstreamFailure::Connect(_) | UpstreamFailure::Server { .. } => {
                warn!("Operation '{}': upstream unavailable: {}", operation, failure);
                return Err(ProxyError::ServiceUnavailable(failure.to_string()));
            }
            other => {
                return Err(ProxyError::operation_failed(
                    format!("Failed to {}", operation),
                    other,
                ));
            }
        }
    }
}
