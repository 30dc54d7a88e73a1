#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pricebook_api::config::{ServerConfig, StoreBackend};
use pricebook_api::router::build_app_router;
use pricebook_api::state::AppState;
use pricebook_core::catalog::NewProduct;
use pricebook_core::memory::InMemoryStore;
use pricebook_core::service::ResolutionService;

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        store_backend: StoreBackend::Memory,
        ..ServerConfig::default()
    }
}

/// Catalog used by most tests: ABC123 Widget 10.00, DEF456 Gadget 25.00,
/// GHI789 Bolt 0.50.
pub fn seeded_store() -> Arc<InMemoryStore> {
    let store = InMemoryStore::with_products([
        NewProduct::new("ABC123", "Widget", 10.0),
        NewProduct::new("DEF456", "Gadget", 25.0),
        NewProduct::new("GHI789", "Bolt", 0.5),
    ])
    .unwrap();
    Arc::new(store)
}

/// Full application router over the seeded catalog.
pub fn build_test_app() -> Router {
    build_test_app_with(seeded_store())
}

/// Full application router over `store`, with the production middleware stack.
pub fn build_test_app_with(store: Arc<InMemoryStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: Arc<InMemoryStore>, config: ServerConfig) -> Router {
    let service = ResolutionService::new(store.clone(), store);
    let state = AppState {
        service: Arc::new(service),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty(), false).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Body::from(body.to_string()), true).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Body::from(body.to_string()), true).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    send(app, Method::POST, uri, Body::from(body), true).await
}

async fn send(app: Router, method: Method, uri: &str, body: Body, json: bool) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if json {
        builder = builder.header("content-type", "application/json");
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
