//! Data models for the employee proxy
//!
//! Public employee types, the upstream wire format, and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod employee;
pub mod requests;
pub mod responses;
pub mod upstream;

// Re-export commonly used types
pub use employee::{Employee, NewEmployee};
pub use requests::EmployeeInput;
pub use responses::{ErrorResponse, HealthResponse, RegionStatsResponse, StatsResponse};
pub use upstream::{Envelope, UpstreamCreateRequest, UpstreamEmployee};
