//! Error types for the employee proxy
//!
//! Provides unified error handling using thiserror. `UpstreamFailure` is the
//! raw signal produced by the transport; `ProxyError` is what operations return
//! and what the HTTP boundary turns into a status code.

use std::collections::BTreeMap;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

// == Upstream Failure ==
/// Transport-level outcome of a failed upstream call.
///
/// Carries no retry or caching semantics; the resilience layer decides what
/// each variant means for the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    /// Network unreachable, connection refused or timed out
    #[error("could not reach upstream: {0}")]
    Connect(String),

    /// Upstream answered with a 5xx status
    #[error("upstream server error {status}: {body}")]
    Server { status: u16, body: String },

    /// Upstream answered with a 4xx status other than 404
    #[error("upstream rejected request with {status}: {body}")]
    Client {
        status: u16,
        body: String,
        retry_after_secs: Option<u64>,
    },

    /// Upstream answered 404 for the named resource
    #[error("upstream has no resource {resource}")]
    NotFound { resource: String },

    /// Response body could not be decoded
    #[error("upstream returned an unreadable body: {0}")]
    InvalidBody(String),

    /// Any other transport problem (request building, body streaming)
    #[error("upstream transport error: {0}")]
    Transport(String),
}

impl UpstreamFailure {
    /// Status code the upstream uses to signal rate limiting.
    pub const TOO_MANY_REQUESTS: u16 = 429;
}

// == Proxy Error Enum ==
/// Unified error type for every employee operation.
///
/// `Clone` so one failed upstream call can be handed to every caller that was
/// waiting on it.
#[derive(Error, Debug, Clone)]
pub enum ProxyError {
    /// No employee with the given id or name exists upstream
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// Upstream is rate limiting; not retried internally
    #[error("Upstream is rate limiting requests")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Upstream unreachable or failing with 5xx
    #[error("Upstream service is unavailable: {0}")]
    ServiceUnavailable(String),

    /// Input rejected at the boundary, keyed by field name
    #[error("Validation failed: {0:?}")]
    ValidationFailed(BTreeMap<String, String>),

    /// Upstream payload is missing a required field or holds an invalid value
    #[error("Could not map upstream employee: {0}")]
    Mapping(String),

    /// Anything else, with the original cause kept for logging
    #[error("{context}: {cause}")]
    OperationFailed { context: String, cause: String },

    /// Startup configuration could not be applied
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ProxyError {
    /// Wraps an arbitrary cause under an operation-level context message.
    pub fn operation_failed(context: impl Into<String>, cause: impl ToString) -> Self {
        Self::OperationFailed {
            context: context.into(),
            cause: cause.to_string(),
        }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        Self::ValidationFailed(errors)
    }

    /// HTTP status the boundary reports for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::Mapping(_) | Self::OperationFailed { .. } | Self::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!("Request failed: {}", message);
        } else {
            warn!("Request rejected: {}", message);
        }

        match self {
            ProxyError::ValidationFailed(errors) => (status, Json(errors)).into_response(),
            ProxyError::RateLimited { retry_after_secs } => {
                let body = Json(json!({
                    "error": "Rate limit exceeded. Please try again later.",
                    "retryAfterSeconds": retry_after_secs,
                }));
                match retry_after_secs {
                    Some(secs) => {
                        (status, [(header::RETRY_AFTER, secs.to_string())], body).into_response()
                    }
                    None => (status, body).into_response(),
                }
            }
            ProxyError::ServiceUnavailable(_) => {
                let body = Json(json!({
                    "error": "Upstream service is unavailable. Please try again later.",
                    "message": message,
                }));
                (status, body).into_response()
            }
            _ => (status, Json(ErrorResponse::new(message))).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
