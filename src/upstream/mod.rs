//! Upstream Client Module
//!
//! Transport adapter for the upstream employee service. No retry or caching
//! lives here; failures come back as [`crate::error::UpstreamFailure`].

mod client;
mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use client::UpstreamClient;
pub use transport::{HttpTransport, RawResponse, Transport};

/// Path segment of the employee collection on the upstream.
pub const EMPLOYEE_RESOURCE: &str = "employee";
