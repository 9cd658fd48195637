//! Resilience Module
//!
//! Retry with exponential backoff around single upstream attempts, and the
//! translation of transport failures into operation errors.

mod retry;

pub use retry::{with_resilience, RetryPolicy};
