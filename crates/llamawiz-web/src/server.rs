//! Router construction and the serve loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use llamawiz_chat::ChatService;

use crate::connections::ConnectionRegistry;
use crate::handlers;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ChatService>,
    pub connections: Arc<ConnectionRegistry>,
}

impl AppState {
    pub fn new(service: Arc<ChatService>) -> Self {
        AppState {
            service,
            connections: Arc::new(ConnectionRegistry::new()),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/connect", post(handlers::connect))
        .route(
            "/api/connections/{connection}/sessions",
            get(handlers::list_sessions).post(handlers::new_session),
        )
        .route("/api/connections/{connection}/load", post(handlers::load_session))
        .route("/api/connections/{connection}/chat", post(handlers::submit_turn))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn run(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("failed to read bound address")?;
    info!(addr = %local, model = %state.service.model(), "web host listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("web server error")?;

    info!("web host stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
