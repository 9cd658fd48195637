//! Roster Aggregates
//!
//! Pure derivations over a fetched roster. They never talk to the upstream, so
//! the derived views always agree with the list they were computed from.

use crate::models::Employee;

/// Highest salary on the roster, 0 when the roster is empty.
pub fn highest_salary(employees: &[Employee]) -> u32 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

/// Names of the `limit` best paid employees, highest salary first.
///
/// Ties keep roster order.
pub fn top_earner_names(employees: &[Employee], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.salary.cmp(&a.salary));
    ranked
        .into_iter()
        .take(limit)
        .map(|e| e.name.clone())
        .collect()
}

/// Employees whose name contains `needle`, ignoring case.
///
/// An empty needle matches everyone.
pub fn filter_by_name(employees: &[Employee], needle: &str) -> Vec<Employee> {
    let needle = needle.to_lowercase();
    employees
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
