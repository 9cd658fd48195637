//! In-memory upstream used by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use uuid::Uuid;

use super::{RawResponse, Transport};
use crate::error::UpstreamFailure;
use crate::models::UpstreamEmployee;

/// In-memory upstream keeping a roster and counting requests per method.
#[derive(Default)]
pub(crate) struct FakeUpstream {
    pub(crate) roster: Mutex<Vec<UpstreamEmployee>>,
    pub(crate) gets: AtomicUsize,
    pub(crate) posts: AtomicUsize,
    pub(crate) deletes: AtomicUsize,
    pub(crate) refuse_deletes: bool,
    pub(crate) fail_with: Option<UpstreamFailure>,
    /// Latency added before every answer
    pub(crate) delay: Duration,
}

impl FakeUpstream {
    pub(crate) fn with(rows: Vec<UpstreamEmployee>) -> Self {
        Self {
            roster: Mutex::new(rows),
            ..Self::default()
        }
    }

    fn ok(data: Value) -> std::result::Result<RawResponse, UpstreamFailure> {
        Ok(RawResponse {
            status: 200,
            body: json!({ "data": data, "status": "ok" }).to_string(),
        })
    }
}

#[async_trait]
impl Transport for FakeUpstream {
    async fn send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<Value>,
    ) -> std::result::Result<RawResponse, UpstreamFailure> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(failure) = &self.fail_with {
            self.gets.fetch_add(1, Ordering::SeqCst);
            return Err(failure.clone());
        }
        let mut roster = self.roster.lock().unwrap();
        match (method, path) {
            (Method::GET, [_]) => {
                self.gets.fetch_add(1, Ordering::SeqCst);
                Self::ok(json!(*roster))
            }
            (Method::GET, [_, id]) => {
                self.gets.fetch_add(1, Ordering::SeqCst);
                let found = roster
                    .iter()
                    .find(|e| e.id.map(|v| v.to_string()).as_deref() == Some(*id));
                match found {
                    Some(e) => Self::ok(json!(e)),
                    None => Err(UpstreamFailure::NotFound {
                        resource: id.to_string(),
                    }),
                }
            }
            (Method::POST, [_]) => {
                self.posts.fetch_add(1, Ordering::SeqCst);
                let body = body.unwrap_or_default();
                let created = UpstreamEmployee {
                    id: Some(Uuid::new_v4()),
                    employee_name: body["name"].as_str().map(str::to_string),
                    employee_salary: body["salary"].as_i64(),
                    employee_age: body["age"].as_i64(),
                    employee_title: body["title"].as_str().map(str::to_string),
                    employee_email: None,
                };
                roster.push(created.clone());
                Self::ok(json!(created))
            }
            (Method::DELETE, [_, name]) => {
                self.deletes.fetch_add(1, Ordering::SeqCst);
                if self.refuse_deletes {
                    return Self::ok(json!(false));
                }
                let before = roster.len();
                roster.retain(|e| e.employee_name.as_deref() != Some(*name));
                Self::ok(json!(roster.len() < before))
            }
            _ => Err(UpstreamFailure::Transport("unexpected request".into())),
        }
    }
}

pub(crate) fn row(name: &str, salary: i64) -> UpstreamEmployee {
    UpstreamEmployee {
        id: Some(Uuid::new_v4()),
        employee_name: Some(name.to_string()),
        employee_salary: Some(salary),
        employee_age: Some(30),
        employee_title: Some("Engineer".to_string()),
        employee_email: None,
    }
}
