//! Router setup and configuration.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{admin, call, health, mobile, numbers, pages};
use crate::api::middleware::auth::{CredentialAuth, SessionAuth, enforce};
use crate::api::state::AppState;

/// Create the main application router.
///
/// Auth layers are attached with `route_layer` before the public routes of
/// a group are added, so login and handshake endpoints stay reachable.
pub fn create_router(state: AppState) -> Router {
    let session_auth = Arc::new(SessionAuth::new(
        Arc::clone(&state.sessions),
        state.config.auth.cookie_name.clone(),
    ));
    let credential_auth = Arc::new(CredentialAuth::new(state.config.auth.api_token.clone()));

    // Health and metrics routes (no auth required)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/metrics", get(health::metrics));

    // Telephony webhooks and the landing page (public)
    let public_routes = Router::new()
        .route("/", get(pages::landing))
        .route("/call", get(call::incoming_call).post(call::incoming_call_form))
        .route("/call_end", get(call::call_end).post(call::call_end_form));

    // Admin pages (session auth), login/logout outside the gate
    let admin_routes = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/numbers", post(admin::add_number))
        .route("/admin/numbers/remove", post(admin::remove_number))
        .route("/admin/numbers/replace", post(admin::replace_numbers))
        .route_layer(middleware::from_fn_with_state(
            session_auth,
            enforce::<SessionAuth>,
        ))
        .route("/admin/login", get(admin::login_form).post(admin::login))
        .route("/admin/logout", get(admin::logout).post(admin::logout));

    // Registry API (credential auth)
    let api_routes = Router::new()
        .route(
            "/numbers",
            get(numbers::list_numbers).post(numbers::replace_numbers),
        )
        .route(
            "/numbers/{number}",
            put(numbers::add_number).delete(numbers::remove_number),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&credential_auth),
            enforce::<CredentialAuth>,
        ));

    // Mobile app (credential auth), handshake outside the gate
    let mobile_routes = Router::new()
        .route("/check_number", post(mobile::check_number))
        .route("/add_number", post(mobile::add_number))
        .route("/remove_number", post(mobile::remove_number))
        .route_layer(middleware::from_fn_with_state(
            credential_auth,
            enforce::<CredentialAuth>,
        ))
        .route("/hello", get(mobile::hello));

    Router::new()
        .merge(health_routes)
        .merge(public_routes)
        .merge(admin_routes)
        .nest("/api", api_routes)
        .nest("/mobile", mobile_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
