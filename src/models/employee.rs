//! Public employee representation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee as exposed by the proxy API.
///
/// Immutable once fetched; a later fetch replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by the upstream; absent until the employee has been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub salary: u32,
    pub age: u8,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Create-employee input that has already passed boundary validation.
///
/// Only [`crate::models::EmployeeInput::validate`] produces one, so holding a
/// `NewEmployee` means name and title are non-blank, salary is positive and
/// age lies in `16..=75`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub salary: u32,
    pub age: u8,
    pub title: String,
    pub email: Option<String>,
}
