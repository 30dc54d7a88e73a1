use axum::routing::{get, post};
use axum::Router;

use crate::handlers::special_prices;
use crate::state::AppState;

/// Routes mounted at `/special-prices`.
///
/// The static `/users` segment takes precedence over `/{email}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(special_prices::create))
        .route("/users", get(special_prices::list_users))
        .route(
            "/{email}",
            get(special_prices::get_by_email).put(special_prices::update),
        )
}
