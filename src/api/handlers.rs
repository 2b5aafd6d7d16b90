use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::db::is_unique_violation;
use crate::models::Employee;
use crate::service::{EmployeeService, ServiceError};

// ============================================================
// Error Handling
// ============================================================

/// Map a service error to a response.
///
/// Duplicate emails become 409, whether the service caught them up front or
/// the `UNIQUE` column rejected the write. Other storage failures are logged
/// in full and reported to the client as a generic 500.
fn service_error(e: ServiceError) -> (StatusCode, String) {
    match e {
        conflict @ ServiceError::Conflict { .. } => {
            tracing::warn!("Conflict: {}", conflict);
            (StatusCode::CONFLICT, conflict.to_string())
        }
        ServiceError::Storage(err) if is_unique_violation(&err) => {
            tracing::warn!("Unique constraint violation: {:#}", err);
            (
                StatusCode::CONFLICT,
                "Employee email is already in use".to_string(),
            )
        }
        ServiceError::Storage(err) => {
            tracing::error!("Internal error: {:#}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

fn not_found(id: i64) -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        format!("Employee not found with id: {id}"),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Employees
// ============================================================

pub async fn create_employee(
    State(service): State<EmployeeService>,
    Json(input): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), (StatusCode, String)> {
    service
        .save_employee(input)
        .map(|e| (StatusCode::CREATED, Json(e)))
        .map_err(service_error)
}

pub async fn list_employees(
    State(service): State<EmployeeService>,
) -> Result<Json<Vec<Employee>>, (StatusCode, String)> {
    service.get_all_employees().map(Json).map_err(service_error)
}

pub async fn get_employee(
    State(service): State<EmployeeService>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, (StatusCode, String)> {
    service
        .get_employee_by_id(id)
        .map_err(service_error)?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Replace every field of an existing employee. The path id wins over any
/// id in the body.
pub async fn update_employee(
    State(service): State<EmployeeService>,
    Path(id): Path<i64>,
    Json(input): Json<Employee>,
) -> Result<Json<Employee>, (StatusCode, String)> {
    if service
        .get_employee_by_id(id)
        .map_err(service_error)?
        .is_none()
    {
        return Err(not_found(id));
    }

    service
        .update_employee(input.with_id(id))
        .map(Json)
        .map_err(service_error)
}

pub async fn delete_employee(
    State(service): State<EmployeeService>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    service.delete_employee(id).map_err(service_error)?;
    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Employee deleted successfully!" })),
    ))
}
