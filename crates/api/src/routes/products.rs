use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/{sku}", get(products::get_by_sku))
}
