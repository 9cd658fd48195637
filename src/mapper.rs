//! Field Mapper
//!
//! Pure conversions between the public employee shape and the upstream's
//! `employee_*` shape.

use crate::error::{ProxyError, Result};
use crate::models::{Employee, NewEmployee, UpstreamCreateRequest, UpstreamEmployee};

/// Converts an upstream employee into its public form.
///
/// Missing email is fine; missing name, salary, age or title, or a numeric
/// value outside the public type's range, is a [`ProxyError::Mapping`].
pub fn to_public(upstream: UpstreamEmployee) -> Result<Employee> {
    let name = required(upstream.employee_name, "employee_name")?;
    let title = required(upstream.employee_title, "employee_title")?;
    let salary = required(upstream.employee_salary, "employee_salary")?;
    let age = required(upstream.employee_age, "employee_age")?;

    let salary = u32::try_from(salary)
        .map_err(|_| ProxyError::Mapping(format!("employee_salary out of range: {}", salary)))?;
    let age = u8::try_from(age)
        .map_err(|_| ProxyError::Mapping(format!("employee_age out of range: {}", age)))?;

    Ok(Employee {
        id: upstream.id,
        name,
        salary,
        age,
        title,
        email: upstream.employee_email,
    })
}

/// Builds the upstream create payload. Email has no upstream equivalent.
pub fn to_upstream_create(employee: &NewEmployee) -> UpstreamCreateRequest {
    UpstreamCreateRequest {
        name: employee.name.clone(),
        salary: employee.salary,
        age: employee.age,
        title: employee.title.clone(),
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ProxyError::Mapping(format!("upstream employee is missing {}", field)))
}
