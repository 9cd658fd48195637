//! Upstream wire format
//!
//! The upstream service prefixes employee fields with `employee_` and wraps
//! every payload in a `{ "data": ..., "status": ... }` envelope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response envelope used by every upstream endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Employee as returned by the upstream service.
///
/// Everything is optional here; [`crate::mapper::to_public`] decides which
/// absences are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamEmployee {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub employee_salary: Option<i64>,
    #[serde(default)]
    pub employee_age: Option<i64>,
    #[serde(default)]
    pub employee_title: Option<String>,
    #[serde(default)]
    pub employee_email: Option<String>,
}

/// Body of `POST /employee` on the upstream. The upstream has no email input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamCreateRequest {
    pub name: String,
    pub salary: u32,
    pub age: u8,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_employee_list() {
        let json = r#"{
            "data": [{
                "id": "4a3a170b-22cd-4ac2-aad1-9bb5b34a1507",
                "employee_name": "Tiger Nixon",
                "employee_salary": 320800,
                "employee_age": 61,
                "employee_title": "Vice Chair Executive Principal of Chief Operations Implementation Specialist",
                "employee_email": "tnixon@company.com"
            }],
            "status": "Successfully processed request."
        }"#;
        let envelope: Envelope<Vec<UpstreamEmployee>> = serde_json::from_str(json).unwrap();
        let data = envelope.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].employee_name.as_deref(), Some("Tiger Nixon"));
        assert_eq!(data[0].employee_salary, Some(320800));
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: Envelope<bool> = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.status.as_deref(), Some("ok"));
    }
}
