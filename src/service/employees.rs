//! Employee Service
//!
//! One method per public operation. Reads go through the response cache;
//! writes go straight to the upstream and invalidate every region on success.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::aggregates::{filter_by_name, highest_salary, top_earner_names};
use super::TOP_EARNERS_LIMIT;
use crate::cache::{Region, ResponseCache};
use crate::error::{ProxyError, Result};
use crate::mapper::{to_public, to_upstream_create};
use crate::models::{Employee, NewEmployee};
use crate::resilience::{with_resilience, RetryPolicy};
use crate::upstream::UpstreamClient;

/// Key used by regions that hold a single value.
const SINGLETON_KEY: &str = "";

// == Employee Service ==
/// Stateless orchestration of employee operations. Cheap to share behind an
/// `Arc`; the only shared mutable state is the cache.
#[derive(Clone)]
pub struct EmployeeService {
    upstream: UpstreamClient,
    cache: Arc<ResponseCache>,
    retry: RetryPolicy,
}

impl EmployeeService {
    pub fn new(upstream: UpstreamClient, cache: Arc<ResponseCache>, retry: RetryPolicy) -> Self {
        Self {
            upstream,
            cache,
            retry,
        }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    // == List All ==
    pub async fn list_all(&self, bypass: bool) -> Result<Vec<Employee>> {
        self.cache
            .get_or_compute(Region::ListAll, SINGLETON_KEY, bypass, || self.fetch_all())
            .await
    }

    async fn fetch_all(&self) -> Result<Vec<Employee>> {
        info!("Fetching all employees from upstream");
        let rows = with_resilience("fetch all employees", &self.retry, || {
            self.upstream.list_employees()
        })
        .await?
        .unwrap_or_default();

        let employees = rows.into_iter().map(to_public).collect::<Result<Vec<_>>>()?;
        info!("Fetched {} employees", employees.len());
        Ok(employees)
    }

    // == Search ==
    /// Case-insensitive name search over the (cached) full roster.
    pub async fn search(&self, needle: &str, bypass: bool) -> Result<Vec<Employee>> {
        let key = needle.to_lowercase();
        self.cache
            .get_or_compute(Region::Search, &key, bypass, || {
                self.filter_roster(&key, bypass)
            })
            .await
    }

    async fn filter_roster(&self, needle: &str, bypass: bool) -> Result<Vec<Employee>> {
        let roster = self.list_all(bypass).await?;
        Ok(filter_by_name(&roster, needle))
    }

    // == Get By Id ==
    pub async fn get_by_id(&self, id: Uuid, bypass: bool) -> Result<Employee> {
        self.cache
            .get_or_compute(Region::ById, &id.to_string(), bypass, || self.fetch_one(id))
            .await
    }

    async fn fetch_one(&self, id: Uuid) -> Result<Employee> {
        info!("Fetching employee {} from upstream", id);
        let row = with_resilience("fetch employee", &self.retry, || {
            self.upstream.get_employee(id)
        })
        .await?
        .ok_or_else(|| ProxyError::EmployeeNotFound(id.to_string()))?;
        to_public(row)
    }

    // == Highest Salary ==
    pub async fn highest_salary(&self, bypass: bool) -> Result<u32> {
        self.cache
            .get_or_compute(Region::HighestSalary, SINGLETON_KEY, bypass, || {
                self.max_salary(bypass)
            })
            .await
    }

    async fn max_salary(&self, bypass: bool) -> Result<u32> {
        let roster = self.list_all(bypass).await?;
        Ok(highest_salary(&roster))
    }

    // == Top Ten Names ==
    pub async fn top_ten_names(&self, bypass: bool) -> Result<Vec<String>> {
        self.cache
            .get_or_compute(Region::TopEarners, SINGLETON_KEY, bypass, || {
                self.rank_earners(bypass)
            })
            .await
    }

    async fn rank_earners(&self, bypass: bool) -> Result<Vec<String>> {
        let roster = self.list_all(bypass).await?;
        Ok(top_earner_names(&roster, TOP_EARNERS_LIMIT))
    }

    // == Create ==
    /// Creates an employee upstream and returns it in public form.
    pub async fn create(&self, employee: NewEmployee) -> Result<Employee> {
        info!("Creating employee '{}'", employee.name);
        let request = to_upstream_create(&employee);
        let created = with_resilience("create employee", &self.retry, || {
            self.upstream.create_employee(&request)
        })
        .await?;

        self.cache.invalidate_all().await;

        let created = created.ok_or_else(|| {
            ProxyError::operation_failed("Failed to create employee", "upstream returned no data")
        })?;
        let created = to_public(created)?;
        info!("Created employee '{}' with id {:?}", created.name, created.id);
        Ok(created)
    }

    // == Delete By Id ==
    /// Resolves `id` to a name, deletes by name, and returns that name.
    ///
    /// The lookup honours `bypass`, so without it a cached name may be used
    /// for the delete.
    pub async fn delete_by_id(&self, id: Uuid, bypass: bool) -> Result<String> {
        let name = self.get_by_id(id, bypass).await?.name;
        info!("Deleting employee {} ('{}')", id, name);

        let deleted = with_resilience("delete employee", &self.retry, || {
            self.upstream.delete_employee(&name)
        })
        .await?;

        // Even a refused delete means our view of the roster is suspect.
        self.cache.invalidate_all().await;

        if deleted == Some(true) {
            info!("Deleted employee '{}'", name);
            Ok(name)
        } else {
            warn!(
                "Upstream did not delete '{}' although {} resolved to it",
                name, id
            );
            Err(ProxyError::EmployeeNotFound(name))
        }
    }
}
