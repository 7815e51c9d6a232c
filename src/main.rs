//! User Directory Service — Entry Point
//!
//! Initializes configuration, logging, the database pool, and the API
//! server. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (optional) + env overrides + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create shutdown broadcast channel
//! 4. Build lazy PostgreSQL pool (UserRepository port)
//! 5. Ensure users table exists (idempotent, non-fatal on failure)
//! 6. Create Prometheus registry
//! 7. Spawn metrics push task when GRAFANA_* env vars are set
//! 8. Spawn API server (/healthz /readiness /users /metrics)
//! 9. Wait for SIGINT → graceful shutdown (drain→stop tasks→exit)

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::http::{ApiServer, AppState};
use adapters::metrics::{MetricsPusher, MetricsRegistry, PushConfig};
use adapters::persistence::PgUserRepository;
use ports::repository::UserRepository;
use usecases::users::UserService;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config =
        config::loader::load_config("config.toml").context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.service.log_level)
            }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.service.environment,
        port = config.server.port,
        "Starting user directory service"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Build lazy PostgreSQL pool ───────────────────────
    let repository = Arc::new(
        PgUserRepository::connect(&config.database, config.is_production())
            .context("Failed to configure database pool")?,
    );

    // ── 5. Ensure schema (idempotent, non-fatal) ────────────
    if let Err(e) = repository.ensure_schema().await {
        warn!(
            error = %format!("{e:#}"),
            "Schema initialization failed — continuing without guaranteed schema"
        );
    }

    // ── 6. Prometheus registry ──────────────────────────────
    let metrics =
        Arc::new(MetricsRegistry::new().context("Failed to build metrics registry")?);

    // ── 7. Optional metrics push task ───────────────────────
    let push_handle = if config.metrics.enabled {
        match PushConfig::from_env(&config.metrics) {
            Some(push_config) => {
                let pusher = MetricsPusher::new(Arc::clone(&metrics), push_config)?;
                let push_shutdown = shutdown_tx.subscribe();
                Some(tokio::spawn(async move {
                    if let Err(e) = pusher.run(push_shutdown).await {
                        error!(error = %e, "Metrics push task failed");
                    }
                }))
            }
            None => {
                info!(
                    "Metrics push disabled — GRAFANA_PUSH_URL/GRAFANA_USERNAME/GRAFANA_API_KEY not set"
                );
                None
            }
        }
    } else {
        None
    };

    // ── 8. Spawn API server ─────────────────────────────────
    let state = AppState {
        users: Arc::new(UserService::new(
            Arc::clone(&repository) as Arc<dyn UserRepository>
        )),
        repository: repository as Arc<dyn UserRepository>,
        metrics,
    };
    let bind_address = format!("{}:{}", config.server.bind_address, config.server.port);
    let server = ApiServer::new(state, bind_address, config.metrics.enabled);
    let server_shutdown = shutdown_tx.subscribe();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run(server_shutdown).await {
            error!(error = %e, "API server failed");
        }
    });

    info!("All tasks spawned — service is running");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    signal::ctrl_c()
        .await
        .context("Failed to listen for SIGINT")?;
    info!("SIGINT received, initiating graceful shutdown");

    let _ = shutdown_tx.send(());

    // Drain in-flight requests, then stop the push task.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), server_handle).await;
    if let Some(handle) = push_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), handle).await;
    }

    info!("Shutdown complete");
    Ok(())
}
