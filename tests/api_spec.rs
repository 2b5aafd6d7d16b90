use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use employee_registry::api::create_router;
use employee_registry::db::{Database, EmployeeStore};
use employee_registry::models::*;
use employee_registry::service::EmployeeService;
use serde_json::{json, Value};

fn setup() -> (TestServer, Database) {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(EmployeeService::new(Arc::new(db.clone())));
    (
        TestServer::new(app).expect("Failed to create test server"),
        db,
    )
}

async fn create_employee(server: &TestServer, first: &str, last: &str, email: &str) -> Employee {
    server
        .post("/api/employees")
        .json(&json!({ "firstName": first, "lastName": last, "email": email }))
        .await
        .json::<Employee>()
}

mod create {
    use super::*;

    #[tokio::test]
    async fn returns_created_employee_with_id() {
        let (server, _db) = setup();

        let response = server
            .post("/api/employees")
            .json(&json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["id"].is_i64());
        assert_eq!(body["firstName"], "John");
        assert_eq!(body["lastName"], "Doe");
        assert_eq!(body["email"], "john.doe@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let (server, db) = setup();
        create_employee(&server, "John", "Doe", "john.doe@example.com").await;

        let response = server
            .post("/api/employees")
            .json(&json!({
                "firstName": "Johnny",
                "lastName": "Dee",
                "email": "john.doe@example.com"
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert!(response.text().contains("john.doe@example.com"));
        assert_eq!(db.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let (server, db) = setup();

        let response = server
            .post("/api/employees")
            .json(&json!({ "firstName": "John" }))
            .await;

        assert!(response.status_code().is_client_error());
        assert_eq!(db.count().unwrap(), 0);
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn returns_empty_array_when_no_employees_exist() {
        let (server, _db) = setup();

        let response = server.get("/api/employees").await;

        response.assert_status_ok();
        let employees: Vec<Employee> = response.json();
        assert!(employees.is_empty());
    }

    #[tokio::test]
    async fn returns_all_employees() {
        let (server, db) = setup();
        db.save(Employee::new("John", "Doe", "john.doe@example.com"))
            .unwrap();
        db.save(Employee::new("Jane", "Doe", "jane.doe@example.com"))
            .unwrap();

        let response = server.get("/api/employees").await;

        response.assert_status_ok();
        let employees: Vec<Employee> = response.json();
        assert_eq!(employees.len(), 2);
    }
}

mod get {
    use super::*;

    #[tokio::test]
    async fn returns_the_employee() {
        let (server, _db) = setup();
        let created = create_employee(&server, "Jane", "Doe", "Jane@gmail.com").await;

        let response = server
            .get(&format!("/api/employees/{}", created.id.unwrap()))
            .await;

        response.assert_status_ok();
        let employee: Employee = response.json();
        assert_eq!(employee, created);
    }

    #[tokio::test]
    async fn returns_404_for_unknown_id() {
        let (server, _db) = setup();
        create_employee(&server, "Jane", "Doe", "Jane@gmail.com").await;

        let response = server.get("/api/employees/-1").await;

        response.assert_status_not_found();
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn replaces_all_fields() {
        let (server, _db) = setup();
        let created = create_employee(&server, "John", "Doe", "john.doe@example.com").await;
        let id = created.id.unwrap();

        let response = server
            .put(&format!("/api/employees/{id}"))
            .json(&json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "Jane@gmail.com"
            }))
            .await;

        response.assert_status_ok();
        let employee: Employee = response.json();
        assert_eq!(employee.id, Some(id));
        assert_eq!(employee.first_name, "Jane");
        assert_eq!(employee.email, "Jane@gmail.com");

        let fetched: Employee = server.get(&format!("/api/employees/{id}")).await.json();
        assert_eq!(fetched, employee);
    }

    #[tokio::test]
    async fn path_id_wins_over_body_id() {
        let (server, db) = setup();
        let created = create_employee(&server, "John", "Doe", "john.doe@example.com").await;
        let id = created.id.unwrap();

        let response = server
            .put(&format!("/api/employees/{id}"))
            .json(&json!({
                "id": id + 100,
                "firstName": "John",
                "lastName": "Smith",
                "email": "john.doe@example.com"
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Employee>().id, Some(id));
        assert_eq!(db.count().unwrap(), 1);
        assert!(!db.exists_by_id(id + 100).unwrap());
    }

    #[tokio::test]
    async fn returns_404_for_unknown_id() {
        let (server, db) = setup();
        create_employee(&server, "John", "Doe", "john.doe@example.com").await;

        let response = server
            .put("/api/employees/-1")
            .json(&json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "Jane@gmail.com"
            }))
            .await;

        response.assert_status_not_found();
        assert_eq!(db.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn email_taken_by_another_employee_is_a_conflict() {
        let (server, _db) = setup();
        create_employee(&server, "John", "Doe", "john.doe@example.com").await;
        let jane = create_employee(&server, "Jane", "Doe", "jane.doe@example.com").await;

        let response = server
            .put(&format!("/api/employees/{}", jane.id.unwrap()))
            .json(&json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "john.doe@example.com"
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_the_employee() {
        let (server, _db) = setup();
        let created = create_employee(&server, "Jane", "Doe", "Jane@gmail.com").await;
        let path = format!("/api/employees/{}", created.id.unwrap());

        let response = server.delete(&path).await;

        response.assert_status_ok();
        server.get(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn returns_200_for_unknown_id() {
        let (server, _db) = setup();

        let response = server.delete("/api/employees/12345").await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn frees_the_email_for_reuse() {
        let (server, _db) = setup();
        let created = create_employee(&server, "Jane", "Doe", "Jane@gmail.com").await;
        server
            .delete(&format!("/api/employees/{}", created.id.unwrap()))
            .await
            .assert_status_ok();

        let response = server
            .post("/api/employees")
            .json(&json!({ "firstName": "Jane", "lastName": "Doe", "email": "Jane@gmail.com" }))
            .await;

        response.assert_status(StatusCode::CREATED);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let (server, _db) = setup();

        let response = server.get("/api/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }
}
