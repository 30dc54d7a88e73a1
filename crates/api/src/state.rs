use std::sync::Arc;

use pricebook_core::service::ResolutionService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Catalog lookups and special-price account operations.
    pub service: Arc<ResolutionService>,
    pub config: Arc<ServerConfig>,
}
