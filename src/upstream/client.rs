//! Typed upstream calls
//!
//! Wraps a [`Transport`] with one method per upstream endpoint and decodes the
//! `{ data, status }` envelope. Each call is a single attempt.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use super::{HttpTransport, Transport, EMPLOYEE_RESOURCE};
use crate::config::Config;
use crate::error::{Result, UpstreamFailure};
use crate::models::{Envelope, UpstreamCreateRequest, UpstreamEmployee};

type UpstreamResult<T> = std::result::Result<T, UpstreamFailure>;

/// Client for the upstream employee endpoints.
#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
}

impl UpstreamClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Creates an HTTP-backed client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(
            &config.upstream_base_url,
            config.connect_timeout(),
            config.request_timeout(),
        )?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// `GET /employee`
    pub async fn list_employees(&self) -> UpstreamResult<Option<Vec<UpstreamEmployee>>> {
        self.exchange(Method::GET, &[EMPLOYEE_RESOURCE], None).await
    }

    /// `GET /employee/{id}`
    pub async fn get_employee(&self, id: Uuid) -> UpstreamResult<Option<UpstreamEmployee>> {
        let id = id.to_string();
        self.exchange(Method::GET, &[EMPLOYEE_RESOURCE, &id], None)
            .await
    }

    /// `POST /employee`, echoing the created employee
    pub async fn create_employee(
        &self,
        request: &UpstreamCreateRequest,
    ) -> UpstreamResult<Option<UpstreamEmployee>> {
        let body = serde_json::to_value(request)
            .map_err(|e| UpstreamFailure::Transport(format!("encoding create request: {}", e)))?;
        self.exchange(Method::POST, &[EMPLOYEE_RESOURCE], Some(body))
            .await
    }

    /// `DELETE /employee/{name}`, reporting whether the upstream deleted anything
    pub async fn delete_employee(&self, name: &str) -> UpstreamResult<Option<bool>> {
        self.exchange(Method::DELETE, &[EMPLOYEE_RESOURCE, name], None)
            .await
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Value>,
    ) -> UpstreamResult<Option<T>> {
        let raw = self.transport.send(method, path, body).await?;
        if raw.body.trim().is_empty() {
            return Ok(None);
        }
        let envelope: Envelope<T> = serde_json::from_str(&raw.body)
            .map_err(|e| UpstreamFailure::InvalidBody(e.to_string()))?;
        Ok(envelope.data)
    }
}
