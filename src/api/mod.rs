//! API Module
//!
//! HTTP handlers and routing for the employee proxy REST API.
//!
//! # Endpoints
//! - `GET /api/v1/employee` - List all employees
//! - `GET /api/v1/employee/search/:search_string` - Search employees by name
//! - `GET /api/v1/employee/:id` - Fetch one employee
//! - `GET /api/v1/employee/highestSalary` - Highest salary on the roster
//! - `GET /api/v1/employee/topTenHighestEarningEmployeeNames` - Top ten earners
//! - `POST /api/v1/employee` - Create an employee
//! - `DELETE /api/v1/employee/:id` - Delete an employee, returning its name
//! - `GET /cache/stats` - Per-region cache statistics
//! - `GET /health` - Health check endpoint
//!
//! Read endpoints honour the `X-Cache-Bypass: true` header.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
