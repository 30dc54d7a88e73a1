//! Integration tests for the health endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /api/v1/health returns the status envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_timestamp() {
    let response = get(build_test_app(), "/api/v1/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Server is running smoothly");
    assert!(json["timestamp"].is_string());
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404 naming the path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let response = get(build_test_app(), "/api/v1/nope?x=1").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Route /api/v1/nope?x=1 not found");
}

// ---------------------------------------------------------------------------
// Test: Wrong method on a known path returns the same 404 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_method_on_known_path_returns_404_envelope() {
    let cases = [
        (Method::DELETE, "/api/v1/special-prices/a@b.com"),
        (Method::POST, "/api/v1/products"),
        (Method::GET, "/api/v1/special-prices"),
        (Method::PATCH, "/api/v1/products/ABC123"),
    ];

    for (method, uri) in cases {
        let request = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = build_test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], format!("Route {uri} not found"));
    }
}

// ---------------------------------------------------------------------------
// Test: x-request-id is generated and echoed back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_carries_request_id() {
    let response = get(build_test_app(), "/api/v1/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn supplied_request_id_is_propagated() {
    let request = Request::builder()
        .uri("/api/v1/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();

    let response = build_test_app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight from the frontend origin is allowed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_frontend_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/special-prices")
        .header("origin", "http://localhost:3001")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = build_test_app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3001"
    );
}
