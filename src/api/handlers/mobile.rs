//! Mobile app endpoints.
//!
//! `hello` is the public handshake the app uses to discover the server; the
//! rest sit behind the credential policy.

use axum::{Form, Json, extract::State};

use crate::api::state::AppState;
use crate::domain::{ExistsResponse, HelloResponse, NumberParam, SuccessResponse};
use crate::error::Result;

/// `GET /mobile/hello`: server identification.
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /mobile/check_number`: whether a number is registered.
pub async fn check_number(
    State(state): State<AppState>,
    Form(param): Form<NumberParam>,
) -> Json<ExistsResponse> {
    Json(ExistsResponse {
        exists: state.registry.contains(&param.number),
    })
}

/// `POST /mobile/add_number`: register the caller's number.
///
/// # Errors
///
/// Returns 400 for a blank number and 500 if the list cannot be persisted.
pub async fn add_number(
    State(state): State<AppState>,
    Form(param): Form<NumberParam>,
) -> Result<Json<SuccessResponse>> {
    state.registry.add(&param.number).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// `POST /mobile/remove_number`: unregister a number.
///
/// # Errors
///
/// Returns 500 if the list cannot be persisted.
pub async fn remove_number(
    State(state): State<AppState>,
    Form(param): Form<NumberParam>,
) -> Result<Json<SuccessResponse>> {
    state.registry.remove(&param.number).await?;
    Ok(Json(SuccessResponse::ok()))
}
