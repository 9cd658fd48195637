//! Cached Values
//!
//! Every region stores a [`CachedValue`]; [`CacheValue`] converts operation
//! results in and out of it.

use crate::models::Employee;

/// Result of a read operation as held by the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Employees(Vec<Employee>),
    Employee(Employee),
    Salary(u32),
    Names(Vec<String>),
}

/// Operation result types the cache can hold.
pub trait CacheValue: Clone + Send + Sized {
    fn into_cached(self) -> CachedValue;

    /// `None` when the stored value has a different shape.
    fn from_cached(value: CachedValue) -> Option<Self>;

    /// Empty results are never stored, so a transient empty upstream answer
    /// cannot pin an empty view for a whole TTL.
    fn is_storable(&self) -> bool {
        true
    }
}

impl CacheValue for Vec<Employee> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Employees(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Employees(v) => Some(v),
            _ => None,
        }
    }

    fn is_storable(&self) -> bool {
        !self.is_empty()
    }
}

impl CacheValue for Employee {
    fn into_cached(self) -> CachedValue {
        CachedValue::Employee(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Employee(v) => Some(v),
            _ => None,
        }
    }
}

impl CacheValue for u32 {
    fn into_cached(self) -> CachedValue {
        CachedValue::Salary(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Salary(v) => Some(v),
            _ => None,
        }
    }
}

impl CacheValue for Vec<String> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Names(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Names(v) => Some(v),
            _ => None,
        }
    }

    fn is_storable(&self) -> bool {
        !self.is_empty()
    }
}
