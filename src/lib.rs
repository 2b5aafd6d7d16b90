//! Employee records over an HTTP JSON API.
//!
//! Layers, top down: [`api`] (axum routes) calls [`service`] (email
//! uniqueness on create) which calls an [`db::EmployeeStore`] (SQLite via
//! [`db::Database`]).

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod service;
