//! Shared helpers for integration tests: an in-memory upstream and app
//! builders wired to it.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, Router};
use reqwest::Method;
use serde_json::{json, Value};
use uuid::Uuid;

use employee_proxy::error::UpstreamFailure;
use employee_proxy::models::UpstreamEmployee;
use employee_proxy::resilience::RetryPolicy;
use employee_proxy::upstream::{RawResponse, Transport, UpstreamClient};
use employee_proxy::{create_router, AppState, EmployeeService, ResponseCache};

// == Memory Upstream ==
/// Stateful stand-in for the upstream employee service.
#[derive(Default)]
pub struct MemoryUpstream {
    roster: Mutex<Vec<UpstreamEmployee>>,
    /// Failures returned, in order, before any request is served normally
    failures: Mutex<VecDeque<UpstreamFailure>>,
    calls: AtomicUsize,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl MemoryUpstream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seeded(rows: Vec<UpstreamEmployee>) -> Arc<Self> {
        let upstream = Self::default();
        *upstream.roster.lock().unwrap() = rows;
        Arc::new(upstream)
    }

    pub fn push_failure(&self, failure: UpstreamFailure) {
        self.failures.lock().unwrap().push_back(failure);
    }

    pub fn insert(&self, row: UpstreamEmployee) {
        self.roster.lock().unwrap().push(row);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn envelope(data: Value) -> Result<RawResponse, UpstreamFailure> {
        Ok(RawResponse {
            status: 200,
            body: json!({ "data": data, "status": "Successfully processed request." })
                .to_string(),
        })
    }
}

#[async_trait]
impl Transport for MemoryUpstream {
    async fn send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Value>,
    ) -> Result<RawResponse, UpstreamFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = self.failures.lock().unwrap().pop_front() {
            return Err(failure);
        }

        let mut roster = self.roster.lock().unwrap();
        match (method, path) {
            (Method::GET, [_]) => {
                self.list_calls.fetch_add(1, Ordering::SeqCst);
                Self::envelope(json!(*roster))
            }
            (Method::GET, [_, id]) => {
                self.get_calls.fetch_add(1, Ordering::SeqCst);
                roster
                    .iter()
                    .find(|e| e.id.map(|v| v.to_string()).as_deref() == Some(*id))
                    .map(|e| Self::envelope(json!(e)))
                    .unwrap_or_else(|| {
                        Err(UpstreamFailure::NotFound {
                            resource: id.to_string(),
                        })
                    })
            }
            (Method::POST, [_]) => {
                let body = body.unwrap_or_default();
                let created = UpstreamEmployee {
                    id: Some(Uuid::new_v4()),
                    employee_name: body["name"].as_str().map(str::to_string),
                    employee_salary: body["salary"].as_i64(),
                    employee_age: body["age"].as_i64(),
                    employee_title: body["title"].as_str().map(str::to_string),
                    employee_email: body["name"]
                        .as_str()
                        .map(|n| format!("{}@company.com", n.to_lowercase().replace(' ', "."))),
                };
                roster.push(created.clone());
                Self::envelope(json!(created))
            }
            (Method::DELETE, [_, name]) => {
                let before = roster.len();
                roster.retain(|e| e.employee_name.as_deref() != Some(*name));
                Self::envelope(json!(roster.len() < before))
            }
            _ => Err(UpstreamFailure::Transport("unexpected request".into())),
        }
    }
}

// == Builders ==
pub fn employee(name: &str, salary: i64) -> UpstreamEmployee {
    UpstreamEmployee {
        id: Some(Uuid::new_v4()),
        employee_name: Some(name.to_string()),
        employee_salary: Some(salary),
        employee_age: Some(35),
        employee_title: Some("Engineer".to_string()),
        employee_email: None,
    }
}

pub fn service(upstream: Arc<MemoryUpstream>) -> EmployeeService {
    EmployeeService::new(
        UpstreamClient::new(upstream),
        Arc::new(ResponseCache::new(1000, Duration::from_secs(60))),
        RetryPolicy::immediate(3),
    )
}

pub fn app(upstream: Arc<MemoryUpstream>) -> Router {
    create_router(AppState::new(service(upstream)))
}

pub async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
