//! Inbound HTTP server.
//!
//! Provides two endpoints:
//! - `POST /lead` - process one lead and relay the CMS answer
//! - `GET /status` - JSON counters of pipeline outcomes

mod error;
mod handlers;
mod types;

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use handlers::{lead_handler, status_handler};
pub use error::status_for;
pub use types::{AppState, ErrorBody, StatusResponse};

/// Builds the router for the lead server.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/lead", post(lead_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Serves on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    log::info!("Lead server listening on http://{}/", addr);
    log::info!("  - Intake: http://{}/lead", addr);
    log::info!("  - Status: http://{}/status", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!("Lead server error: {}", e))?;

    log::info!("Lead server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
