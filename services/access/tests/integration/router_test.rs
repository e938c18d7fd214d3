use std::sync::Arc;

use axum::http::{StatusCode, header};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use securevisit_access::operator::{OperatorDirectory, OperatorRole};
use securevisit_access::router::build_router;
use securevisit_access::state::AppState;
use securevisit_core::middleware::REQUEST_ID_HEADER;
use securevisit_testing::auth::MockOperator;

/// Router over a connection that was never opened: anything that reaches the
/// store fails, everything rejected before it does not.
fn server() -> TestServer {
    let operators = OperatorDirectory::new()
        .with_operator("admin1", "desk-pass", "Receptionist", OperatorRole::Admin)
        .with_operator("security", "gate-pass", "security", OperatorRole::Security);
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        operators: Arc::new(operators),
        default_location: Some("HQ".to_owned()),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn admin() -> MockOperator {
    MockOperator::new("admin1", "desk-pass")
}

fn guard() -> MockOperator {
    MockOperator::new("security", "gate-pass")
}

fn issue_body(valid_from: &str, valid_until: &str) -> Value {
    json!({
        "visitor_name": "Jane Doe",
        "visit_host": "Mr. Smith",
        "valid_from": valid_from,
        "valid_until": valid_until,
    })
}

#[tokio::test]
async fn healthz_is_always_ok() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn readyz_reports_unreachable_store() {
    let server = server();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_echo_request_id() {
    let server = server();
    let response = server.get("/healthz").await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn issue_without_credentials_is_401() {
    let server = server();
    let response = server
        .post("/access-codes")
        .json(&issue_body("09:00", "17:00"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn issue_with_wrong_password_is_401() {
    let server = server();
    let (name, value) = MockOperator::new("admin1", "nope").header();
    server
        .post("/access-codes")
        .add_header(name, value)
        .json(&issue_body("09:00", "17:00"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn issue_as_security_is_403() {
    let server = server();
    let (name, value) = guard().header();
    let response = server
        .post("/access-codes")
        .add_header(name, value)
        .json(&issue_body("09:00", "17:00"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn verify_as_admin_is_403() {
    let server = server();
    let (name, value) = admin().header();
    server
        .post("/access-codes/verify")
        .add_header(name, value)
        .json(&json!({ "code": "1234567" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_as_security_is_403() {
    let server = server();
    let (name, value) = guard().header();
    server
        .get("/access-codes")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn issue_with_reversed_window_is_400() {
    let server = server();
    let (name, value) = admin().header();
    let response = server
        .post("/access-codes")
        .add_header(name, value)
        .json(&issue_body("17:00", "09:00"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_WINDOW");
}

#[tokio::test]
async fn issue_with_blank_visitor_is_400() {
    let server = server();
    let (name, value) = admin().header();
    let response = server
        .post("/access-codes")
        .add_header(name, value)
        .json(&json!({
            "visitor_name": "  ",
            "visit_host": "Mr. Smith",
            "valid_from": "09:00",
            "valid_until": "17:00",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "EMPTY_FIELD");
    assert_eq!(body["message"], "visitor_name must not be empty");
}

#[tokio::test]
async fn verify_with_blank_code_is_400() {
    let server = server();
    let (name, value) = guard().header();
    let response = server
        .post("/access-codes/verify")
        .add_header(name, value)
        .json(&json!({ "code": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "EMPTY_FIELD");
}

#[tokio::test]
async fn issue_with_store_down_is_503() {
    let server = server();
    let (name, value) = admin().header();
    let response = server
        .post("/access-codes")
        .add_header(name, value)
        .json(&issue_body("09:00", "17:00"))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["kind"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn verify_with_store_down_is_503() {
    let server = server();
    let (name, value) = guard().header();
    server
        .post("/access-codes/verify")
        .add_header(name, value)
        .json(&json!({ "code": "1234567" }))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn list_with_store_down_is_503() {
    let server = server();
    let (name, value) = admin().header();
    let response = server
        .get("/access-codes")
        .add_query_param("include-expired", false)
        .add_query_param("days-to-keep", 3)
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["kind"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn list_with_huge_look_back_still_answers() {
    let server = server();
    let (name, value) = admin().header();
    let response = server
        .get("/access-codes")
        .add_query_param("include-expired", false)
        .add_query_param("days-to-keep", u32::MAX)
        .add_header(name, value)
        .await;

    // Reaches the store instead of failing while building the filter.
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["kind"], "STORE_UNAVAILABLE");
}
