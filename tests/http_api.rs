//! HTTP API Tests
//!
//! End-to-end behaviour of the JSON API through the axum router:
//! - create then fetch returns identical values
//! - pagination, search and sort metadata
//! - invalid updates leave stored data unchanged
//! - unknown ids and malformed bodies map to 404 / 400

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use chrono::Local;
use dynaform::http_server::{HttpServer, HttpServerConfig};
use dynaform::schema::{onboarding_schema, CompiledSchema};
use dynaform::storage::{JsonFileBackend, SubmissionStore, SUBMISSIONS_FILE};
use dynaform::submissions::SubmissionService;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn service_in(dir: &TempDir) -> Arc<SubmissionService> {
    let today = Local::now().date_naive();
    let compiled = CompiledSchema::compile(onboarding_schema(today)).unwrap();
    let store = SubmissionStore::open(Box::new(JsonFileBackend::in_dir(dir.path())));
    Arc::new(SubmissionService::new(Arc::new(compiled), store))
}

fn app(dir: &TempDir) -> Router {
    HttpServer::with_config(HttpServerConfig::default(), service_in(dir)).router()
}

fn valid_values() -> Value {
    let start = Local::now().date_naive() + chrono::Duration::days(14);
    json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "age": 29,
        "department": "design",
        "skills": ["react", "sql"],
        "startDate": start.format("%Y-%m-%d").to_string(),
        "bio": "Designer",
        "remoteEligible": true
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, values: &Value) -> String {
    let (status, body) = send(app, Method::POST, "/api/submissions", Some(values.to_string())).await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Schema and Health
// =============================================================================

#[tokio::test]
async fn test_form_schema_endpoint() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(&app(&dir), Method::GET, "/api/form-schema", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["schema"]["title"], "Employee Onboarding");
    assert_eq!(body["schema"]["fields"].as_array().unwrap().len(), 8);
    assert_eq!(body["schema"]["fields"][5]["type"], "date");
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(&app(&dir), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Create / Read
// =============================================================================

/// Create then fetch returns identical values.
#[tokio::test]
async fn test_create_then_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let values = valid_values();

    let id = create(&app, &values).await;
    let (status, body) = send(&app, Method::GET, &format!("/api/submissions/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["id"], id.as_str());
    assert_eq!(body["submission"]["values"], values);
    assert!(body["submission"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_invalid_returns_field_errors() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let mut values = valid_values();
    values["age"] = json!(17);
    values["skills"] = json!([]);
    values["extra"] = json!("x");

    let (status, body) = send(&app, Method::POST, "/api/submissions", Some(values.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"]["age"], "Must be at least 18.");
    assert_eq!(body["errors"]["skills"], "This field is required.");
    assert_eq!(body["errors"]["extra"], "This field is not allowed.");
    assert_eq!(body["errors"].as_object().unwrap().len(), 3);

    let (_, list) = send(&app, Method::GET, "/api/submissions", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_get_unknown_id() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(&app(&dir), Method::GET, "/api/submissions/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Submission not found" }));
}

// =============================================================================
// Malformed Bodies
// =============================================================================

#[tokio::test]
async fn test_malformed_json_body() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(
        &app(&dir),
        Method::POST,
        "/api/submissions",
        Some("{ not json".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_non_object_body() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(
        &app(&dir),
        Method::POST,
        "/api/submissions",
        Some("[1, 2, 3]".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Request body must be a JSON object");
}

// =============================================================================
// Listing
// =============================================================================

/// 25 submissions with limit 10: three pages, the last one holding 5.
#[tokio::test]
async fn test_pagination() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    for i in 0..25 {
        let mut values = valid_values();
        values["fullName"] = json!(format!("Person {:02}", i));
        create(&app, &values).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/submissions?page=3&limit=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 25);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["page"], 3);
    assert_eq!(body["sortBy"], "createdAt");
    assert_eq!(body["sortOrder"], "desc");
    assert_eq!(body["submissions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_list_parameter_normalization() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create(&app, &valid_values()).await;

    let (_, body) = send(&app, Method::GET, "/api/submissions?page=-4&limit=500&sortOrder=sideways", None).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 100);
    assert_eq!(body["sortOrder"], "desc");

    let (_, body) = send(&app, Method::GET, "/api/submissions?page=abc&limit=0", None).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
}

#[tokio::test]
async fn test_search_without_matches() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create(&app, &valid_values()).await;

    let (status, body) = send(&app, Method::GET, "/api/submissions?q=zzzz-nothing", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["submissions"], json!([]));
}

#[tokio::test]
async fn test_search_matches_array_elements_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create(&app, &valid_values()).await;
    let mut other = valid_values();
    other["skills"] = json!(["go"]);
    create(&app, &other).await;

    let (_, body) = send(&app, Method::GET, "/api/submissions?q=REACT", None).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_sort_order() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let first = create(&app, &valid_values()).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create(&app, &valid_values()).await;

    let (_, desc) = send(&app, Method::GET, "/api/submissions", None).await;
    assert_eq!(desc["submissions"][0]["id"], second.as_str());

    let (_, asc) = send(&app, Method::GET, "/api/submissions?sortOrder=asc", None).await;
    assert_eq!(asc["submissions"][0]["id"], first.as_str());
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_replaces_values() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;

    let mut values = valid_values();
    values["fullName"] = json!("Janet Doe");
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/submissions/{}", id),
        Some(values.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["values"]["fullName"], "Janet Doe");
}

/// An invalid update returns 400 and leaves the stored record unchanged.
#[tokio::test]
async fn test_invalid_update_leaves_record_unchanged() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;
    let uri = format!("/api/submissions/{}", id);
    let (_, before) = send(&app, Method::GET, &uri, None).await;

    let mut values = valid_values();
    values["email"] = json!("not-an-email");
    let (status, body) = send(&app, Method::PUT, &uri, Some(values.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["email"], "Please match the required pattern.");

    let (_, after) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(before, after);
}

/// Validation runs before the lookup, so a bad payload on a missing id is a 400.
#[tokio::test]
async fn test_invalid_update_of_unknown_id_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let (status, _) = send(
        &app(&dir),
        Method::PUT,
        "/api/submissions/missing",
        Some(json!({ "age": 5 }).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_valid_update_of_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let (status, _) = send(
        &app(&dir),
        Method::PUT,
        "/api/submissions/missing",
        Some(valid_values().to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;
    let uri = format!("/api/submissions/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Deleting an unknown id is a 404 with no side effects.
#[tokio::test]
async fn test_delete_unknown_id() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create(&app, &valid_values()).await;
    let on_disk = std::fs::read_to_string(dir.path().join(SUBMISSIONS_FILE)).unwrap();

    let (status, body) = send(&app, Method::DELETE, "/api/submissions/unknown", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Submission not found");
    assert_eq!(
        std::fs::read_to_string(dir.path().join(SUBMISSIONS_FILE)).unwrap(),
        on_disk
    );
}

// =============================================================================
// Export and Pages
// =============================================================================

#[tokio::test]
async fn test_csv_export() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create(&app, &valid_values()).await;

    let response = app
        .clone()
        .oneshot(Request::get("/api/export.csv").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("\"id\",\"createdAt\",\"fullName\",\"email\""));
    assert!(lines[1].contains("\"react, sql\""));
    assert!(lines[1].ends_with("\"Yes\""));
}

#[tokio::test]
async fn test_form_page_renders() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("<form method=\"post\" action=\"/\""));
    assert!(html.contains("name=\"fullName\""));
}

#[tokio::test]
async fn test_form_post_redirects_to_table() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let start = (Local::now().date_naive() + chrono::Duration::days(3))
        .format("%Y-%m-%d")
        .to_string();
    let body = format!(
        "fullName=Jane+Doe&email=jane%40example.com&age=29&department=design\
         &skills=react&skills=sql&startDate={}&bio=&remoteEligible=on",
        start
    );

    let response = app
        .clone()
        .oneshot(
            Request::post("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/submissions");

    let (_, list) = send(&app, Method::GET, "/api/submissions", None).await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["submissions"][0]["values"]["age"], 29);
    assert_eq!(list["submissions"][0]["values"]["remoteEligible"], true);
}

#[tokio::test]
async fn test_form_post_invalid_rerenders() {
    let dir = TempDir::new().unwrap();
    let response = app(&dir)
        .oneshot(
            Request::post("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("fullName=J"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Must be at least 2 characters."));
    assert!(html.contains("value=\"J\""));
}

// =============================================================================
// Detail, Editor and Delete Pages
// =============================================================================

async fn page(app: &Router, method: Method, uri: &str, form: Option<String>) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(text) => {
            request = request.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(text)
        }
        None => Body::empty(),
    };
    app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
}

async fn html_of(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_body(name: &str) -> String {
    let start = (Local::now().date_naive() + chrono::Duration::days(3))
        .format("%Y-%m-%d")
        .to_string();
    format!(
        "fullName={}&email=jane%40example.com&age=29&department=design\
         &skills=react&startDate={}&bio=&remoteEligible=on",
        name, start
    )
}

#[tokio::test]
async fn test_detail_page() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;

    let response = page(&app, Method::GET, &format!("/submissions/{}", id), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = html_of(response).await;
    assert!(html.contains("<dt>Full Name</dt><dd>Jane Doe</dd>"));
    assert!(html.contains(&format!("/submissions/{}/edit", id)));

    let response = page(&app, Method::GET, "/submissions/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(html_of(response).await.contains("Submission not found"));
}

#[tokio::test]
async fn test_editor_updates_submission() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;
    let uri = format!("/submissions/{}/edit", id);

    let html = html_of(page(&app, Method::GET, &uri, None).await).await;
    assert!(html.contains("value=\"Jane Doe\""));

    let response = page(&app, Method::POST, &uri, Some(form_body("Janet+Doe"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(html_of(response).await.contains("Submission updated."));

    let (_, body) = send(&app, Method::GET, &format!("/api/submissions/{}", id), None).await;
    assert_eq!(body["submission"]["values"]["fullName"], "Janet Doe");
    assert_eq!(body["submission"]["values"]["skills"], json!(["react"]));
}

#[tokio::test]
async fn test_editor_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;

    let response = page(
        &app,
        Method::POST,
        &format!("/submissions/{}/edit", id),
        Some(form_body("J")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html_of(response).await.contains("Must be at least 2 characters."));

    let (_, body) = send(&app, Method::GET, &format!("/api/submissions/{}", id), None).await;
    assert_eq!(body["submission"]["values"]["fullName"], "Jane Doe");
}

#[tokio::test]
async fn test_delete_page_action() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;

    let response = page(&app, Method::POST, &format!("/submissions/{}/delete", id), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/submissions");

    let (_, list) = send(&app, Method::GET, "/api/submissions", None).await;
    assert_eq!(list["total"], 0);

    let response = page(&app, Method::POST, &format!("/submissions/{}/delete", id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_table_page_links_follow_search() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let id = create(&app, &valid_values()).await;

    let response = page(&app, Method::GET, "/submissions?q=%20jane%20&limit=20", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = html_of(response).await;
    assert!(html.contains(&format!("/submissions/{}\">View</a>", id)));
    assert!(html.contains("href=\"/api/export.csv?sortOrder=desc&amp;q=jane\""));
    assert!(html.contains("<option value=\"20\" selected>"));
}

#[tokio::test]
async fn test_padded_search_same_in_list_and_export() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    create(&app, &valid_values()).await;

    let (_, list) = send(&app, Method::GET, "/api/submissions?q=%20jane%20", None).await;
    assert_eq!(list["total"], 1);

    let response = page(&app, Method::GET, "/api/export.csv?q=%20jane%20", None).await;
    let csv = html_of(response).await;
    assert_eq!(csv.lines().count(), 2);
}
