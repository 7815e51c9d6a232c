//! One-shot Database Initialization
//!
//! Creates the users table and verifies it exists, then exits. Safe to
//! run repeatedly; the DDL is conditional. Unlike the in-server
//! initializer, failure here is fatal (non-zero exit) so deploy
//! pipelines can gate on it.

use anyhow::{Context, Result};
use tracing::info;

use user_directory::adapters::persistence::PgUserRepository;
use user_directory::config;
use user_directory::ports::repository::UserRepository;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config =
        config::loader::load_config("config.toml").context("Failed to load configuration")?;

    let repository = PgUserRepository::connect(&config.database, config.is_production())
        .context("Failed to configure database pool")?;

    repository
        .ensure_schema()
        .await
        .context("Failed to initialize schema")?;

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_name = 'users')",
    )
    .fetch_one(repository.pool())
    .await
    .context("Failed to verify users table")?;

    anyhow::ensure!(exists, "users table missing after initialization");

    info!("users table present — database initialized");
    repository.pool().close().await;

    Ok(())
}
