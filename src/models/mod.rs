//! Domain models.
//!
//! [`Employee`] is the only entity. Its email is unique across the whole
//! table, enforced both by [`crate::service::EmployeeService`] on create and
//! by a `UNIQUE` column constraint in storage.

mod employee;

pub use employee::*;
