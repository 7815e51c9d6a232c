//! Configuration Module - TOML-based Service Configuration
//!
//! Loads configuration from an optional `config.toml` with environment
//! variable overrides for deployment-specific values (`DATABASE_URL`,
//! `PORT`, `APP_ENV`). Every field has a serde default so the service
//! boots with no config file at all.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
///
/// Loaded from `config.toml` at startup when present, otherwise built
/// from defaults. Env overrides are applied after loading, then the
/// whole config is validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Service identity and runtime mode.
  #[serde(default)]
  pub service: ServiceConfig,
  /// HTTP listener configuration.
  #[serde(default)]
  pub server: ServerConfig,
  /// PostgreSQL pool configuration.
  #[serde(default)]
  pub database: DatabaseConfig,
  /// Metrics and push-task configuration.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Runtime environment, controlling database TLS behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  /// Local development: plain connections allowed.
  Development,
  /// Production: database TLS forced, certificate validation relaxed.
  Production,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Human-readable service name.
  #[serde(default = "default_service_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Runtime environment (`development` or `production`).
  #[serde(default = "default_environment")]
  pub environment: Environment,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Bind address for the API listener.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
  /// Bind port. Overridden by the `PORT` env var.
  #[serde(default = "default_port")]
  pub port: u16,
}

/// PostgreSQL pool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  /// Connection string. Overridden by the `DATABASE_URL` env var.
  #[serde(default = "default_database_url")]
  pub url: String,
  /// Maximum pooled connections (bounds in-flight database work).
  #[serde(default = "default_max_connections")]
  pub max_connections: u32,
  /// How long a request may wait for a pooled connection (seconds).
  #[serde(default = "default_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Enable the Prometheus registry and `/metrics` route.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Interval between remote-write pushes (seconds).
  #[serde(default = "default_push_interval")]
  pub push_interval_seconds: u64,
  /// Per-push request timeout (milliseconds).
  #[serde(default = "default_push_timeout")]
  pub push_timeout_ms: u64,
  /// Retries per push before giving up until the next interval.
  #[serde(default = "default_push_retries")]
  pub push_max_retries: u32,
}

impl AppConfig {
  /// Whether the service runs in production mode.
  pub fn is_production(&self) -> bool {
    self.service.environment == Environment::Production
  }
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      name: default_service_name(),
      log_level: default_log_level(),
      environment: default_environment(),
    }
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: default_bind_address(),
      port: default_port(),
    }
  }
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      url: default_database_url(),
      max_connections: default_max_connections(),
      acquire_timeout_seconds: default_acquire_timeout(),
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
      push_interval_seconds: default_push_interval(),
      push_timeout_ms: default_push_timeout(),
      push_max_retries: default_push_retries(),
    }
  }
}

// Default value functions for serde

fn default_service_name() -> String {
  "user-directory".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_environment() -> Environment {
  Environment::Development
}

fn default_bind_address() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

fn default_database_url() -> String {
  "postgresql://localhost:5432/crud_db".to_string()
}

fn default_max_connections() -> u32 {
  10
}

fn default_acquire_timeout() -> u64 {
  30
}

fn default_true() -> bool {
  true
}

fn default_push_interval() -> u64 {
  30
}

fn default_push_timeout() -> u64 {
  5000
}

fn default_push_retries() -> u32 {
  3
}
