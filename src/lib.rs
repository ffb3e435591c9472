//! # Intercom Router
//!
//! Routes calls from an apartment intercom to a set of phones:
//!
//! - **Number Registry**: an administrator-editable, de-duplicated list of
//!   destination numbers, flushed to storage on every change
//! - **Authentication Gate**: admin sessions for the web pages, a shared
//!   credential for the API and mobile app
//! - **Call Routing**: answers the telephony provider's webhooks with TwiML
//!   that rings every number at once and plays an announcement when nobody
//!   picks up
//!
//! ## Call flow
//!
//! ```text
//! intercom ──► provider ──GET /call?From=..──► CallRouter ──► <Dial> every number
//!                 │                               ▲
//!                 │                               │ snapshot
//!                 │                        NumberRegistry ◄── /api, /mobile, /admin
//!                 │                               │
//!                 │                               ▼ flush on every change
//!                 │                          NumberStore (file | memory)
//!                 │
//!                 └──GET /call_end?DialCallStatus=..──► fallback <Say/><Hangup/>
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::service::NumberRegistry;
use crate::storage::create_storage;

/// Run the intercom router.
///
/// This function:
/// 1. Loads configuration from files and environment
/// 2. Initializes the storage backend and loads the number registry
/// 3. Starts the HTTP server
/// 4. Handles graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - Storage backend fails to initialize or the registry cannot be loaded
/// - HTTP server fails to bind
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Intercom Router"
    );

    let store = create_storage(&config.storage)
        .await
        .context("failed to initialize storage")?;
    info!(backend = %config.storage.backend, "Storage initialized");

    let registry = NumberRegistry::load(store, &config.registry.initial_numbers)
        .await
        .context("failed to load number registry")?;

    let mut state = AppState::new(Arc::new(config.clone()), Arc::new(registry));
    if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install metrics recorder")?;
        state = state.with_metrics(handle);
    }

    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
