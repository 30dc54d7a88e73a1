//! HTTP-level integration tests for the `/products` catalog endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};

#[tokio::test]
async fn list_returns_products_sorted_by_name() {
    let response = get(build_test_app(), "/api/v1/products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "3 products found");

    let names: Vec<&str> = json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bolt", "Gadget", "Widget"]);
}

#[tokio::test]
async fn list_uses_catalog_wire_names() {
    let json = body_json(get(build_test_app(), "/api/v1/products").await).await;
    let bolt = &json["data"][0];

    assert_eq!(bolt["sku"], "GHI789");
    assert_eq!(bolt["precio"], 0.5);
    assert_eq!(bolt["precioBase"], 0.5);
}

#[tokio::test]
async fn get_by_sku_is_case_insensitive() {
    let response = get(build_test_app(), "/api/v1/products/abc123").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["sku"], "ABC123");
    assert_eq!(json["data"]["nombre"], "Widget");
    assert_eq!(json["data"]["precio"], 10.0);
}

#[tokio::test]
async fn unknown_sku_returns_404() {
    let response = get(build_test_app(), "/api/v1/products/ZZZ999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Product not found");
}
