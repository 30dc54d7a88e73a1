pub mod products;
pub mod special_prices;

use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::response::ApiResponse;

/// Fallback for every unmatched route or method.
///
/// Uses the original URI so paths inside nested routers are reported in full.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure(format!("Route {path} not found"))),
    )
}
