//! PostgreSQL Repository - Pooled User Storage
//!
//! Binds the `UserRepository` port to a PostgreSQL pool. The pool is
//! created lazily so the process starts (and `/healthz` answers) even
//! when the database is unreachable; connection failures surface as
//! per-request errors instead of crashing the service.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::config::DatabaseConfig;
use crate::domain::user::User;
use crate::ports::repository::UserRepository;

/// Idempotent users table DDL, safe to run on every boot.
const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL
)";

/// PostgreSQL-backed user repository.
pub struct PgUserRepository {
    /// Bounded sqlx pool; excess queries queue inside it.
    pool: PgPool,
}

impl PgUserRepository {
    /// Build a lazily-connecting pool from config.
    ///
    /// In production mode TLS is forced with relaxed certificate
    /// validation: `PgSslMode::Require` encrypts the connection but
    /// does not verify the server chain.
    pub fn connect(config: &DatabaseConfig, production: bool) -> Result<Self> {
        let mut options: PgConnectOptions = config
            .url
            .parse()
            .context("Invalid database connection string")?;

        if production {
            options = options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_lazy_with(options);

        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch users")?;

        Ok(users)
    }

    #[instrument(skip(self, name))]
    async fn create_user(&self, name: &str) -> Result<User> {
        let user =
            sqlx::query_as::<_, User>("INSERT INTO users (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .context("Failed to insert user")?;

        Ok(user)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database unreachable")?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create users table")?;

        info!("Database schema ensured");
        Ok(())
    }
}
