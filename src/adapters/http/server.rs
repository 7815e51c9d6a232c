//! API Server - Listener Lifecycle and Graceful Shutdown
//!
//! Binds the TCP listener, serves the router, and drains in-flight
//! requests when the shutdown signal arrives.

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use super::routes::{router, AppState};

/// Axum-based API server for the user directory.
pub struct ApiServer {
    /// Handler dependencies shared with all routes.
    state: AppState,
    /// Bind address, e.g. `0.0.0.0:3000`.
    bind_address: String,
    /// Whether `/metrics` is exposed.
    expose_metrics: bool,
}

impl ApiServer {
    /// Create a new API server.
    pub fn new(state: AppState, bind_address: String, expose_metrics: bool) -> Self {
        Self {
            state,
            bind_address,
            expose_metrics,
        }
    }

    /// Serve until the shutdown signal arrives, then drain.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let app = router(self.state, self.expose_metrics);

        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;
        info!(address = %self.bind_address, "API server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}
