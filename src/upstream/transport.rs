//! Upstream Transport
//!
//! The `Transport` trait is the seam between the proxy and the network. The
//! HTTP implementation normalizes every non-2xx outcome into an
//! [`UpstreamFailure`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header::RETRY_AFTER, Client, Method, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{ProxyError, Result, UpstreamFailure};

// == Raw Response ==
/// Successful (2xx) upstream response, body not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

// == Transport ==
/// Issues one call against the upstream.
///
/// `path` is a list of unencoded segments appended to the upstream root,
/// e.g. `["employee", "Jane Doe"]`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Value>,
    ) -> std::result::Result<RawResponse, UpstreamFailure>;
}

// == HTTP Transport ==
/// `reqwest`-backed transport with connect and request timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Builds a transport rooted at `base_url`.
    pub fn new(base_url: &str, connect_timeout: Duration, request_timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ProxyError::InvalidConfig(format!("upstream base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProxyError::InvalidConfig(format!(
                "upstream base url {} cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .no_proxy()
            .build()
            .map_err(|e| ProxyError::InvalidConfig(format!("http client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn url_for(&self, path: &[&str]) -> std::result::Result<Url, UpstreamFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamFailure::Transport(format!("{} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Value>,
    ) -> std::result::Result<RawResponse, UpstreamFailure> {
        let url = self.url_for(path)?;
        debug!(%method, %url, "sending upstream request");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body = response.text().await.map_err(transport_error)?;
        debug!(%method, %url, status, "received upstream response");

        let resource = path.last().copied().unwrap_or_default();
        classify(status, body, retry_after_secs, resource)
    }
}

/// Sorts an HTTP outcome into a raw response or a typed failure.
pub(crate) fn classify(
    status: u16,
    body: String,
    retry_after_secs: Option<u64>,
    resource: &str,
) -> std::result::Result<RawResponse, UpstreamFailure> {
    match status {
        200..=299 => Ok(RawResponse { status, body }),
        404 => Err(UpstreamFailure::NotFound {
            resource: resource.to_string(),
        }),
        400..=499 => Err(UpstreamFailure::Client {
            status,
            body,
            retry_after_secs,
        }),
        500..=599 => Err(UpstreamFailure::Server { status, body }),
        _ => Err(UpstreamFailure::Transport(format!(
            "unexpected upstream status {}",
            status
        ))),
    }
}

/// Reads a `Retry-After` value as seconds from now.
///
/// Accepts both the delay-seconds and the HTTP-date form; a date in the past
/// means zero.
pub(crate) fn parse_retry_after(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?;
    let secs = at.with_timezone(&Utc).signed_duration_since(Utc::now()).num_seconds();
    Some(secs.max(0) as u64)
}

fn transport_error(err: reqwest::Error) -> UpstreamFailure {
    if err.is_connect() || err.is_timeout() {
        UpstreamFailure::Connect(err.to_string())
    } else {
        UpstreamFailure::Transport(err.to_string())
    }
}
