//! API Handlers
//!
//! HTTP request handlers for each employee proxy endpoint. Handlers only
//! extract, validate and delegate; every decision lives in the service.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{Employee, EmployeeInput, HealthResponse, StatsResponse};
use crate::service::EmployeeService;
use crate::upstream::UpstreamClient;

/// Request header asking for a fresh upstream read.
pub const CACHE_BYPASS_HEADER: &str = "x-cache-bypass";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmployeeService>,
}

impl AppState {
    pub fn new(service: EmployeeService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Wires the HTTP upstream client, cache and retry policy from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let upstream = UpstreamClient::from_config(config)?;
        let cache = Arc::new(ResponseCache::from_config(config));
        Ok(Self::new(EmployeeService::new(
            upstream,
            cache,
            config.retry_policy(),
        )))
    }

    pub fn cache(&self) -> Arc<ResponseCache> {
        self.service.cache().clone()
    }
}

// == Cache Bypass Extractor ==
/// `true` when the request carries `X-Cache-Bypass: true` (any case).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheBypass(pub bool);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CacheBypass {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let bypass = parts
            .headers
            .get(CACHE_BYPASS_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Ok(Self(bypass))
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ProxyError::invalid_field("id", format!("Invalid employee id: {}", raw)))
}

/// Handler for GET /api/v1/employee
pub async fn list_employees_handler(
    State(state): State<AppState>,
    CacheBypass(bypass): CacheBypass,
) -> Result<Json<Vec<Employee>>> {
    Ok(Json(state.service.list_all(bypass).await?))
}

/// Handler for GET /api/v1/employee/search/:search_string
pub async fn search_employees_handler(
    State(state): State<AppState>,
    Path(search_string): Path<String>,
    CacheBypass(bypass): CacheBypass,
) -> Result<Json<Vec<Employee>>> {
    Ok(Json(state.service.search(&search_string, bypass).await?))
}

/// Handler for GET /api/v1/employee/:id
///
/// A malformed id is a 400, never an upstream call.
pub async fn get_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CacheBypass(bypass): CacheBypass,
) -> Result<Json<Employee>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get_by_id(id, bypass).await?))
}

/// Handler for GET /api/v1/employee/highestSalary
pub async fn highest_salary_handler(
    State(state): State<AppState>,
    CacheBypass(bypass): CacheBypass,
) -> Result<Json<u32>> {
    Ok(Json(state.service.highest_salary(bypass).await?))
}

/// Handler for GET /api/v1/employee/topTenHighestEarningEmployeeNames
pub async fn top_ten_names_handler(
    State(state): State<AppState>,
    CacheBypass(bypass): CacheBypass,
) -> Result<Json<Vec<String>>> {
    Ok(Json(state.service.top_ten_names(bypass).await?))
}

/// Handler for POST /api/v1/employee
///
/// Responds 201 with the created employee. An undecodable body is reported
/// like any other validation failure.
pub async fn create_employee_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>)> {
    let Json(input) = payload.map_err(|rejection| {
        ProxyError::invalid_field("body", rejection.body_text())
    })?;
    let employee = input.validate()?;
    let created = state.service.create(employee).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for DELETE /api/v1/employee/:id
///
/// Responds with the deleted employee's name as plain text.
pub async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CacheBypass(bypass): CacheBypass,
) -> Result<String> {
    let id = parse_id(&id)?;
    state.service.delete_by_id(id, bypass).await
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.service.cache().snapshot().await;
    Json(StatsResponse::from(snapshot))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
