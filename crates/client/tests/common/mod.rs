#![allow(dead_code)]

use std::sync::Arc;

use pricebook_api::config::{ServerConfig, StoreBackend};
use pricebook_api::router::build_app_router;
use pricebook_api::state::AppState;
use pricebook_client::PricebookClient;
use pricebook_core::catalog::NewProduct;
use pricebook_core::memory::InMemoryStore;
use pricebook_core::service::ResolutionService;

/// Start the API on an ephemeral port over a seeded in-memory store and
/// return a client pointed at it.
pub async fn spawn_server() -> PricebookClient {
    let store = Arc::new(
        InMemoryStore::with_products([
            NewProduct::new("ABC123", "Widget", 10.0),
            NewProduct::new("DEF456", "Gadget", 25.0),
            NewProduct::new("GHI789", "Bolt", 0.5),
        ])
        .unwrap(),
    );
    let config = ServerConfig {
        store_backend: StoreBackend::Memory,
        ..ServerConfig::default()
    };
    let state = AppState {
        service: Arc::new(ResolutionService::new(store.clone(), store)),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    PricebookClient::new(format!("http://{addr}/api/v1"))
}

/// A client whose server is gone: every request fails to connect.
pub async fn unreachable_client() -> PricebookClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    PricebookClient::new(format!("http://{addr}/api/v1"))
}
