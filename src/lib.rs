//! Employee Proxy - A caching, retrying REST proxy for an employee service
//!
//! Translates a simplified employee API onto an upstream service with a
//! different field convention, rate limits and transient outages.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod mapper;
pub mod models;
pub mod resilience;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::{create_router, AppState};
pub use cache::ResponseCache;
pub use config::Config;
pub use error::{ProxyError, Result};
pub use service::EmployeeService;
pub use tasks::spawn_cleanup_task;
