//! Router assembly and HTTP serving.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers::{self, AppState};

/// Per-request deadline; resolver timeouts fire well before this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Build the proxy's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::query))
        .route("/set_search_cookie", post(handlers::set_search_cookie))
        .route("/del_search_cookie", get(handlers::del_search_cookie))
        .route("/health", get(handlers::health))
        .route("/info", get(handlers::info))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}

/// Bind and serve until interrupted.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr();
    let display_url = format!(
        "http://{}:{}",
        state.config.listen_host, state.config.listen_port
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, url = %display_url, "search engine proxy listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
