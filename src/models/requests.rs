//! Request DTOs for the employee proxy API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ProxyError, Result};
use crate::models::NewEmployee;

/// Minimum accepted employee age, inclusive.
pub const MIN_AGE: i64 = 16;
/// Maximum accepted employee age, inclusive.
pub const MAX_AGE: i64 = 75;

/// Request body for creating an employee (POST /api/v1/employee)
///
/// Every field is optional on the wire so that a missing field is reported as
/// a field-level validation message instead of a JSON decoding error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl EmployeeInput {
    /// Validates the request data
    ///
    /// Collects one message per offending field and fails with
    /// [`ProxyError::ValidationFailed`]; on success yields a [`NewEmployee`].
    pub fn validate(self) -> Result<NewEmployee> {
        let mut errors = BTreeMap::new();

        let name = non_blank(self.name);
        if name.is_none() {
            errors.insert("name".to_string(), "Employee name cannot be blank".to_string());
        }

        let title = non_blank(self.title);
        if title.is_none() {
            errors.insert("title".to_string(), "Employee title cannot be blank".to_string());
        }

        let salary = match self.salary {
            None => {
                errors.insert("salary".to_string(), "Employee salary cannot be null".to_string());
                None
            }
            Some(s) if s <= 0 => {
                errors.insert(
                    "salary".to_string(),
                    "Employee salary must be greater than zero".to_string(),
                );
                None
            }
            Some(s) => match u32::try_from(s) {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.insert("salary".to_string(), "Employee salary is too large".to_string());
                    None
                }
            },
        };

        let age = match self.age {
            None => {
                errors.insert("age".to_string(), "Employee age cannot be null".to_string());
                None
            }
            Some(a) if a < MIN_AGE => {
                errors.insert("age".to_string(), "Employee age must be at least 16".to_string());
                None
            }
            Some(a) if a > MAX_AGE => {
                errors.insert("age".to_string(), "Employee age must be at most 75".to_string());
                None
            }
            Some(a) => u8::try_from(a).ok(),
        };

        let email = non_blank(self.email);

        match (name, salary, age, title) {
            (Some(name), Some(salary), Some(age), Some(title)) if errors.is_empty() => {
                Ok(NewEmployee {
                    name,
                    salary,
                    age,
                    title,
                    email,
                })
            }
            _ => Err(ProxyError::ValidationFailed(errors)),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
