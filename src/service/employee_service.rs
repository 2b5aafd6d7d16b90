use std::sync::Arc;

use thiserror::Error;

use crate::db::EmployeeStore;
use crate::models::Employee;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Another employee already uses this email.
    #[error("Employee already exist with given email: {email}")]
    Conflict { email: String },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Employee use-cases.
///
/// The only rule enforced here is email uniqueness on create. Lookups
/// report absence as `None` and leave it to the caller to decide whether
/// that is a failure.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub fn save_employee(&self, employee: Employee) -> ServiceResult<Employee> {
        if self.store.find_by_email(&employee.email)?.is_some() {
            tracing::warn!("Rejected duplicate employee email: {}", employee.email);
            return Err(ServiceError::Conflict {
                email: employee.email,
            });
        }

        let saved = self.store.save(employee)?;
        tracing::info!("Created employee {:?}", saved.id);
        Ok(saved)
    }

    pub fn get_all_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.store.find_all()?)
    }

    pub fn get_employee_by_id(&self, id: i64) -> ServiceResult<Option<Employee>> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Saves `employee` under its existing id.
    ///
    /// Neither email uniqueness nor the id's existence is checked; with the
    /// SQLite store an unknown id is inserted.
    pub fn update_employee(&self, employee: Employee) -> ServiceResult<Employee> {
        let saved = self.store.save(employee)?;
        tracing::info!("Updated employee {:?}", saved.id);
        Ok(saved)
    }

    pub fn delete_employee(&self, id: i64) -> ServiceResult<()> {
        self.store.delete_by_id(id)?;
        tracing::info!("Deleted employee {}", id);
        Ok(())
    }
}
