use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use rollcall_core::attendance::{
    Employee, EntryRecord, EntryWithStats, LedgerError, LedgerStore, MemoryLedgerStore,
    PendingEntry,
};
use rollcall_shared::{EmployeeId, IdentityGate};

use crate::{AppState, RouterOptions, create_router};

const SECRET: &str = "api-test-secret";

fn employee(raw: &str) -> EmployeeId {
    EmployeeId::parse(raw).unwrap()
}

fn seeded_store() -> Arc<MemoryLedgerStore> {
    let store = Arc::new(MemoryLedgerStore::new());
    store.add_employee(employee("E2"), "Bob");
    store.add_employee(employee("E1"), "Alice");
    store
}

fn app(store: Arc<MemoryLedgerStore>, require_token: bool) -> Router {
    let options = RouterOptions {
        require_token,
        ..RouterOptions::default()
    };
    create_router(AppState::new(store, IdentityGate::new(SECRET)), &options)
}

struct DownStore;

impl LedgerStore for DownStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, LedgerError> {
        Err(LedgerError::Unavailable("connection refused to 10.0.0.5".into()))
    }

    async fn insert_guarded(
        &self,
        _entry: &PendingEntry,
    ) -> Result<Option<EntryWithStats>, LedgerError> {
        Err(LedgerError::Unavailable("connection refused to 10.0.0.5".into()))
    }

    async fn entries_for_employee(
        &self,
        _employee_id: &EmployeeId,
    ) -> Result<Vec<EntryRecord>, LedgerError> {
        Err(LedgerError::Unavailable("connection refused to 10.0.0.5".into()))
    }
}

fn down_app() -> Router {
    create_router(
        AppState::new(Arc::new(DownStore), IdentityGate::new(SECRET)),
        &RouterOptions::default(),
    )
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_entry(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/entries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn entry(employee_id: &str, date: &str, entry_type: &str) -> Value {
    json!({ "employeeId": employee_id, "date": date, "type": entry_type })
}

#[tokio::test]
async fn test_ping() {
    let (status, body) = send(app(seeded_store(), false), get("/ping")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong" }));
}

#[tokio::test]
async fn test_ping_is_never_gated() {
    let (status, _) = send(app(seeded_store(), true), get("/ping")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_employees_ordered_by_id() {
    let (status, body) = send(app(seeded_store(), false), get("/api/employees")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "name": "Alice", "id": "E1" },
            { "name": "Bob", "id": "E2" },
        ])
    );
}

#[tokio::test]
async fn test_create_worked_entry_returns_snapshot() {
    let (status, body) = send(
        app(seeded_store(), false),
        post_entry(&entry("E1", "2030-01-05", "WORKED")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["employeeId"], "E1");
    assert_eq!(body["type"], "WORKED");
    assert_eq!(body["date"], "2030-01-05");
    assert_eq!(body["worked"], 1);
    assert_eq!(body["leave"], 0);
    assert_eq!(body["balance"], 1);
    assert!(body["id"].as_str().is_some_and(|id| id.len() == 36));
}

#[tokio::test]
async fn test_leave_at_zero_balance_is_rejected() {
    let store = seeded_store();
    let (status, body) = send(
        app(Arc::clone(&store), false),
        post_entry(&entry("E1", "2030-01-05", "LEAVE")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "business_rule_violation");
    assert_eq!(body["message"], "insufficient balance");
    assert_eq!(store.entry_count(&employee("E1")), 0);
}

#[tokio::test]
async fn test_leave_consumes_balance() {
    let store = seeded_store();
    let router = app(Arc::clone(&store), false);

    let (status, _) = send(
        router.clone(),
        post_entry(&entry("E1", "2030-01-05", "WORKED")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        router.clone(),
        post_entry(&entry("E1", "2030-01-06", "LEAVE")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["balance"], 0);

    let (status, _) = send(router, post_entry(&entry("E1", "2030-01-07", "LEAVE"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.entry_count(&employee("E1")), 2);
}

#[rstest]
#[case::bad_type(entry("E1", "2030-01-05", "HOLIDAY"))]
#[case::lowercase_type(entry("E1", "2030-01-05", "worked"))]
#[case::bad_date(entry("E1", "2030-02-30", "WORKED"))]
#[case::non_iso_date(entry("E1", "05/01/2030", "WORKED"))]
#[case::negative_year(entry("E1", "-5000-01-01", "WORKED"))]
#[case::five_digit_year(entry("E1", "+12345-01-01", "WORKED"))]
#[case::unpadded_date(entry("E1", "2030-1-5", "WORKED"))]
#[case::bad_employee_id(entry("E 1", "2030-01-05", "WORKED"))]
#[case::unknown_employee(entry("E404", "2030-01-05", "WORKED"))]
#[tokio::test]
async fn test_create_entry_validation(#[case] body: Value) {
    let store = seeded_store();
    let (status, response) = send(app(Arc::clone(&store), false), post_entry(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "validation_error");
    assert_eq!(store.entry_count(&employee("E1")), 0);
}

#[tokio::test]
async fn test_create_entry_malformed_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/entries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"employeeId\": \"E1\""))
        .unwrap();

    let (status, body) = send(app(seeded_store(), false), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_entry_missing_field() {
    let (status, body) = send(
        app(seeded_store(), false),
        post_entry(&json!({ "employeeId": "E1", "date": "2030-01-05" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_list_entries_round_trip() {
    let router = app(seeded_store(), false);
    let (_, created) = send(
        router.clone(),
        post_entry(&entry("E1", "2030-01-05", "WORKED")),
    )
    .await;

    let (status, body) = send(router, get("/api/employees/E1/entries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "year": "2030",
            "month": "1",
            "day": "5",
            "type": "WORKED",
            "entryId": created["id"],
        }])
    );
}

#[tokio::test]
async fn test_list_entries_unknown_employee_is_empty() {
    let (status, body) = send(app(seeded_store(), false), get("/api/employees/E404/entries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_entries_malformed_id() {
    let (status, body) = send(
        app(seeded_store(), false),
        get("/api/employees/not%20an%20id/entries"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[rstest]
#[case::employees(get("/api/employees"))]
#[case::entries(get("/api/employees/E1/entries"))]
#[case::create(post_entry(&entry("E1", "2030-01-05", "WORKED")))]
#[tokio::test]
async fn test_store_failure_is_generic_500(#[case] request: Request<Body>) {
    let (status, body) = send(down_app(), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "internal_error", "message": "An error occurred" })
    );
}

#[tokio::test]
async fn test_gated_route_without_token() {
    let (status, body) = send(app(seeded_store(), true), get("/api/employees")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_gated_route_with_foreign_token() {
    let token = IdentityGate::new("some-other-secret")
        .issue_token("mallory", chrono::Duration::minutes(5))
        .unwrap();
    let request = Request::builder()
        .uri("/api/employees")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(seeded_store(), true), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_gated_route_with_valid_token() {
    let token = IdentityGate::new(SECRET)
        .issue_token("alice", chrono::Duration::minutes(5))
        .unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/entries")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(entry("E1", "2030-01-05", "WORKED").to_string()))
        .unwrap();

    let (status, body) = send(app(seeded_store(), true), request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["balance"], 1);
}
