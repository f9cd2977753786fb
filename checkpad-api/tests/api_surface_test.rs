/// Integration tests for the request surface
///
/// These tests drive the full router and verify the contracts that hold
/// before any store access:
/// - every task route and logout reject requests without a session
/// - malformed credentials are rejected with the right status
/// - request validation bounds are enforced
/// - security headers are present on responses
///
/// Flows that reach the database (registration through task CRUD) run
/// against a live instance in the deployment test environment.
mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::Service as _;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bare_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn response_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Every protected route rejects a request with no credentials
#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = common::test_app();

    let protected = [
        ("GET", "/v1/tasks"),
        ("POST", "/v1/tasks"),
        ("PUT", "/v1/tasks/1"),
        ("DELETE", "/v1/tasks/1"),
        ("POST", "/v1/auth/logout"),
    ];

    for (method, uri) in protected {
        let response = app.clone().call(bare_request(method, uri)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require a session",
            method,
            uri
        );
    }
}

/// A non-bearer Authorization header is malformed, not unauthenticated
#[tokio::test]
async fn test_non_bearer_credentials_are_bad_request() {
    let app = common::test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/tasks")
        .header("authorization", "Basic YWxpY2U6cHcx")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// An unsigned or corrupted token never resolves
#[tokio::test]
async fn test_garbage_bearer_token_is_unauthorized() {
    let app = common::test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/tasks")
        .header("authorization", "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response_body(response).await;
    assert_eq!(body["error"], "unauthorized");
}

/// A token signed with a different secret is rejected before any lookup
#[tokio::test]
async fn test_foreign_signed_token_is_unauthorized() {
    use checkpad_shared::auth::session::{create_session_token, SessionClaims};

    let app = common::test_app();

    let claims = SessionClaims::new(1, uuid::Uuid::new_v4(), chrono::Duration::hours(1));
    let token = create_session_token(&claims, "an-entirely-different-32b-secret!").unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/v1/tasks")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Registration rejects empty fields at the boundary
#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let app = common::test_app();

    let cases = [
        json!({ "username": "", "password": "pw1" }),
        json!({ "username": "alice", "password": "" }),
        json!({ "username": "", "password": "" }),
    ];

    for body in cases {
        let response = app
            .clone()
            .call(json_request("POST", "/v1/auth/register", body.clone()))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "register with {} should fail validation",
            body
        );

        let body = response_body(response).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["details"].is_array());
    }
}

/// Registration rejects an over-long username
#[tokio::test]
async fn test_register_rejects_oversized_username() {
    let app = common::test_app();

    let response = app
        .clone()
        .call(json_request(
            "POST",
            "/v1/auth/register",
            json!({ "username": "a".repeat(151), "password": "pw1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// Login rejects empty fields without consulting the account store
#[tokio::test]
async fn test_login_rejects_empty_fields() {
    let app = common::test_app();

    let response = app
        .clone()
        .call(json_request(
            "POST",
            "/v1/auth/login",
            json!({ "username": "", "password": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// Unknown routes fall through to 404
#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = common::test_app();

    let response = app
        .clone()
        .call(bare_request("GET", "/v1/nothing-here"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The session check runs before path parsing; a bogus id is still 401
#[tokio::test]
async fn test_auth_gate_runs_before_path_validation() {
    let app = common::test_app();

    let response = app
        .clone()
        .call(bare_request("DELETE", "/v1/tasks/not-a-number"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Security headers are applied to every response, including rejections
#[tokio::test]
async fn test_security_headers_on_responses() {
    let app = common::test_app();

    let response = app
        .clone()
        .call(bare_request("GET", "/v1/tasks"))
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
}
