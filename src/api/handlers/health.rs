//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::api::state::AppState;
use crate::error::ErrorCode;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<Value> {
    Json(json!({
        "code": 0,
        "message": "success",
        "data": {
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Readiness probe - checks that the registry store is reachable.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let storage_ok = state.registry.health_check().await.is_ok();

    let status_code = if storage_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = Json(json!({
        "code": if storage_ok { 0 } else { ErrorCode::SERVICE_UNAVAILABLE.as_i32() },
        "message": if storage_ok { "success" } else { "service unavailable" },
        "data": {
            "ready": storage_ok,
            "components": {
                "storage": storage_ok
            },
            "numbers": state.registry.len()
        }
    }));

    (status_code, response)
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP intercom_up Whether the service is up\n");
    output.push_str("# TYPE intercom_up gauge\n");
    output.push_str("intercom_up 1\n");
    output.push_str("# HELP intercom_registered_numbers Destination numbers in the registry\n");
    output.push_str("# TYPE intercom_registered_numbers gauge\n");
    output.push_str(&format!(
        "intercom_registered_numbers {}\n",
        state.registry.len()
    ));

    state.sessions.cleanup();
    output.push_str("# HELP intercom_admin_sessions Live admin sessions\n");
    output.push_str("# TYPE intercom_admin_sessions gauge\n");
    output.push_str(&format!(
        "intercom_admin_sessions {}\n",
        state.sessions.active_sessions()
    ));

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
