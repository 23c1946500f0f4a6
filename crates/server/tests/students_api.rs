use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server::{build_router, AppState};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

fn app() -> Router {
    build_router(AppState::memory(), CorsLayer::very_permissive())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

async fn create(app: &Router, name: &str, grade: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/students",
        Some(json!({"name": name, "grade": grade, "email": email})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["data"].clone()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Ada Lovelace", "grade": "A", "email": "ada@example.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["id"], 1);
    assert_eq!(data["name"], "Ada Lovelace");
    assert_eq!(data["grade"], "A");
    assert_eq!(data["email"], "ada@example.com");
    assert!(data["createdAt"].is_string());
    assert_eq!(data["createdAt"], data["updatedAt"]);
}

#[tokio::test]
async fn list_wraps_records_with_count() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "count": 0, "data": []}));

    create(&app, "Ada", "A", "ada@example.com").await;
    create(&app, "Bob", "B", "bob@example.com").await;

    let (status, body) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "Ada");
    assert_eq!(body["data"][1]["name"], "Bob");
}

#[tokio::test]
async fn create_collects_validation_errors() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/students", Some(json!({"grade": "ABC", "email": "not-an-email"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        json!(["Name is required", "Grade must be at most 2 characters", "Invalid email format"])
    );
}

#[tokio::test]
async fn duplicate_email_is_rejected_with_400() {
    let app = app();
    create(&app, "Ada", "A", "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Other", "grade": "B", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": ["Email already exists"]}));

    // the memory store compares emails exactly, so another casing is a new address
    let (status, body) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"name": "Shout", "grade": "B", "email": "ADA@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "ADA@example.com");

    // still 400 when other fields are invalid too
    let (status, _) = send(&app, Method::POST, "/students", Some(json!({"email": "ada@example.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_404() {
    let app = app();
    for uri in ["/students/1", "/students/abc", "/students/%201"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "error": "Student not found"}));
    }
}

#[tokio::test]
async fn update_merges_fields_and_never_changes_id() {
    let app = app();
    let created = create(&app, "Ada", "A", "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/students/1",
        Some(json!({"id": 99, "grade": "B", "createdAt": "1970-01-01T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["id"], 1);
    assert_eq!(data["name"], "Ada");
    assert_eq!(data["grade"], "B");
    assert_eq!(data["createdAt"], created["createdAt"]);

    let (status, _) = send(&app, Method::GET, "/students/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rejects_invalid_email_and_foreign_duplicate() {
    let app = app();
    create(&app, "Ada", "A", "ada@example.com").await;
    create(&app, "Bob", "B", "bob@example.com").await;

    let (status, body) = send(&app, Method::PUT, "/students/1", Some(json!({"email": "not-an-email"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["Invalid email format"]));

    let (status, body) = send(&app, Method::PUT, "/students/1", Some(json!({"email": "bob@example.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(["Email already exists"]));

    let (status, _) = send(&app, Method::PUT, "/students/1", Some(json!({"email": "ada@example.com"}))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_with_null_field_is_rejected() {
    let app = app();
    create(&app, "Ada", "A", "ada@example.com").await;

    let (status, body) = send(&app, Method::PUT, "/students/1", Some(json!({"name": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": ["Name is required"]}));

    let (status, body) = send(&app, Method::GET, "/students/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ada");
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let (status, body) = send(&app(), Method::PUT, "/students/7", Some(json!({"name": "Nobody"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = app();
    create(&app, "Ada", "A", "ada@example.com").await;

    let (status, body) = send(&app, Method::DELETE, "/students/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, "/students/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, "/students/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_json_body_is_400_envelope() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/students")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .expect("request");
    let response = app.oneshot(request).await.expect("router response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["success"], false);
    assert!(body["error"].is_array());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/students/{id}"].is_object());
}
