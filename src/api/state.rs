//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::{CallRouter, NumberRegistry, SessionService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Destination numbers, shared by every handler.
    pub registry: Arc<NumberRegistry>,
    /// Call routing decisions.
    pub call_router: Arc<CallRouter>,
    /// Admin sessions.
    pub sessions: Arc<SessionService>,
    /// Prometheus exporter handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state around a loaded registry.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, registry: Arc<NumberRegistry>) -> Self {
        let call_router = Arc::new(CallRouter::new(&config.telephony));
        let sessions = Arc::new(SessionService::new(&config.auth));

        Self {
            config,
            registry,
            call_router,
            sessions,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle rendered at `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
