//! HTTP server assembly
//!
//! Builds the router (health probe plus feature routes under `/api/v1`),
//! applies the middleware stack and serves until a shutdown signal arrives.

pub mod response;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::features;
use crate::middleware;
use crate::store::SharedStore;

/// Build the application router with all routes and middleware
pub fn create_router(store: SharedStore, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(store.clone())
        .nest("/api/v1", features::router(store))
        // Innermost first
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(config: Config, store: SharedStore) -> anyhow::Result<()> {
    let app = create_router(store, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Server listening");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    // The drain deadline only starts once a shutdown signal has been received.
    let (drained_tx, drained_rx) = tokio::sync::oneshot::channel::<()>();
    let watchdog = tokio::spawn(async move {
        shutdown_signal().await;
        if tokio::time::timeout(shutdown_timeout, drained_rx).await.is_err() {
            tracing::warn!(
                timeout_secs = shutdown_timeout.as_secs(),
                "Connections still open after shutdown timeout, exiting"
            );
            std::process::exit(1);
        }
    });

    server.await?;
    let _ = drained_tx.send(());
    watchdog.abort();

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Database connectivity probe
async fn health(State(store): State<SharedStore>) -> Response {
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected"
                })),
            )
                .into_response()
        },
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
