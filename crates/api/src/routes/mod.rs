pub mod health;
pub mod products;
pub mod special_prices;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /health                       service status
///
/// /products                     list catalog
/// /products/{sku}               single product
///
/// /special-prices               create (POST)
/// /special-prices/users         account picker list
/// /special-prices/{email}       account view (GET), update (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/products", products::router())
        .nest("/special-prices", special_prices::router())
}
