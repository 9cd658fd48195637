//! Employee Operations
//!
//! Composes the upstream client, field mapper, resilience policy and response
//! cache into the public employee operations.

pub mod aggregates;
mod employees;

pub use employees::EmployeeService;

/// Number of names returned by the top earners operation
pub const TOP_EARNERS_LIMIT: usize = 10;
