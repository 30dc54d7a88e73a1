//! Handlers for the read-only `/products` catalog resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/products
///
/// Every catalog product, sorted by name.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products = state.service.list_catalog().await?;
    let message = format!("{} products found", products.len());
    Ok(Json(ApiResponse::with_message(products, message)))
}

/// GET /api/v1/products/{sku}
///
/// The SKU is matched case-insensitively.
pub async fn get_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = state.service.get_product_by_sku(&sku).await?;
    Ok(Json(ApiResponse::ok(product)))
}
