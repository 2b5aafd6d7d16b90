mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::EmployeeService;

pub fn create_router(service: EmployeeService) -> Router {
    let api = Router::new()
        // Employees
        .route("/employees", get(handlers::list_employees))
        .route("/employees", post(handlers::create_employee))
        .route("/employees/{id}", get(handlers::get_employee))
        .route("/employees/{id}", put(handlers::update_employee))
        .route("/employees/{id}", delete(handlers::delete_employee))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::db::Database;

    fn router() -> Router {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        create_router(EmployeeService::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let response = router()
            .oneshot(
                Request::get("/api/employees/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
