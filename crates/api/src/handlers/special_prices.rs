//! Handlers for the `/special-prices` resource.
//!
//! Accounts are addressed by email; the service normalizes and validates the
//! path segment before any lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pricebook_core::requests::{CreateSpecialPrice, UpdateSpecialPrice};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/special-prices/users
///
/// `(email, user)` of every account, newest first.
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = state.service.list_accounts().await?;
    let message = format!("{} users with special prices found", users.len());
    Ok(Json(ApiResponse::with_message(users, message)))
}

/// GET /api/v1/special-prices/{email}
pub async fn get_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let view = state.service.get_account_view(&email).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/v1/special-prices
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSpecialPrice>,
) -> AppResult<impl IntoResponse> {
    let account = state.service.create_account(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            account,
            "Special price created successfully",
        )),
    ))
}

/// PUT /api/v1/special-prices/{email}
///
/// Absent fields stay as they are; a supplied product list replaces the
/// current one entirely.
pub async fn update(
    State(state): State<AppState>,
    Path(email): Path<String>,
    AppJson(input): AppJson<UpdateSpecialPrice>,
) -> AppResult<impl IntoResponse> {
    let account = state.service.update_account(&email, &input).await?;
    Ok(Json(ApiResponse::with_message(
        account,
        "Special price updated successfully",
    )))
}
