//! HTTP server lifecycle — bind, serve, shut down gracefully.

use std::sync::Arc;

use crate::api::router::app_router;
use crate::state::AppState;

/// Bind the listener and serve until a shutdown signal arrives.
pub async fn serve(state: Arc<AppState>, bind_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
