//! Business rules sitting between the HTTP handlers and the store.

mod employee_service;

pub use employee_service::*;
