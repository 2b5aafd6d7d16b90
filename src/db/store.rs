use anyhow::Result;

use crate::models::Employee;

/// Persistence contract for employee records.
///
/// Implementations own the stored rows; callers only ever see copies.
/// Any error is a storage failure and is passed through untouched.
pub trait EmployeeStore: Send + Sync {
    /// Insert when `employee.id` is `None`, otherwise upsert by id.
    /// Returns the stored record with its identifier populated.
    fn save(&self, employee: Employee) -> Result<Employee>;

    /// All records in insertion order.
    fn find_all(&self) -> Result<Vec<Employee>>;

    fn find_by_id(&self, id: i64) -> Result<Option<Employee>>;

    fn find_by_email(&self, email: &str) -> Result<Option<Employee>>;

    /// Removing an id that does not exist is not an error.
    fn delete_by_id(&self, id: i64) -> Result<()>;

    fn exists_by_id(&self, id: i64) -> Result<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }

    fn count(&self) -> Result<u64>;
}
