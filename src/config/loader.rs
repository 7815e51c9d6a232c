//! Configuration Loader - File Loading, Env Overrides, Validation
//!
//! Reads `config.toml` when present (defaults otherwise), applies
//! environment variable overrides, and validates the result with
//! clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{AppConfig, Environment};

/// Load configuration, apply env overrides, and validate.
///
/// # Arguments
/// * `path` - Path to the config.toml file; a missing file is not an
///   error, the defaults are used instead
///
/// # Errors
/// Returns detailed error if:
/// - An existing file can't be read or parsed
/// - An env override has an invalid value (e.g. non-numeric `PORT`)
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let mut config = if path.exists() {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content).with_context(|| "Failed to parse config.toml")?
  } else {
    AppConfig::default()
  };

  apply_env_overrides(&mut config)?;
  validate_config(&config)?;

  info!(
    service = %config.service.name,
    environment = ?config.service.environment,
    port = config.server.port,
    pool_size = config.database.max_connections,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Apply deployment env vars on top of the file/default config.
///
/// Recognized overrides:
/// - `DATABASE_URL` → `database.url`
/// - `PORT` → `server.port`
/// - `APP_ENV` → `service.environment` (`development` | `production`)
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
  if let Ok(url) = std::env::var("DATABASE_URL") {
    config.database.url = url;
  }

  if let Ok(port) = std::env::var("PORT") {
    config.server.port = port
      .parse()
      .with_context(|| format!("Invalid PORT value: {port}"))?;
  }

  if let Ok(env) = std::env::var("APP_ENV") {
    config.service.environment = match env.to_ascii_lowercase().as_str() {
      "production" => Environment::Production,
      "development" => Environment::Development,
      other => anyhow::bail!("Invalid APP_ENV value: {other}"),
    };
  }

  Ok(())
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(config.server.port != 0, "server.port must not be 0");
  anyhow::ensure!(
    !config.server.bind_address.is_empty(),
    "server.bind_address must not be empty"
  );

  anyhow::ensure!(
    !config.database.url.is_empty(),
    "database.url must not be empty"
  );
  anyhow::ensure!(
    config.database.max_connections > 0,
    "database.max_connections must be positive, got {}",
    config.database.max_connections
  );
  anyhow::ensure!(
    config.database.acquire_timeout_seconds > 0,
    "database.acquire_timeout_seconds must be positive"
  );

  anyhow::ensure!(
    config.metrics.push_interval_seconds > 0,
    "metrics.push_interval_seconds must be positive"
  );
  anyhow::ensure!(
    config.metrics.push_timeout_ms > 0,
    "metrics.push_timeout_ms must be positive"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_valid() {
    let config = AppConfig::default();
    assert!(validate_config(&config).is_ok());
    assert!(!config.is_production());
  }

  #[test]
  fn parses_full_config() {
    let config: AppConfig = toml::from_str(
      r#"
        [service]
        name = "user-directory"
        log_level = "debug"
        environment = "production"

        [server]
        bind_address = "127.0.0.1"
        port = 8080

        [database]
        url = "postgresql://db.internal:5432/users"
        max_connections = 5
        acquire_timeout_seconds = 10

        [metrics]
        enabled = false
        push_interval_seconds = 60
      "#,
    )
    .unwrap();

    assert!(config.is_production());
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.max_connections, 5);
    assert!(!config.metrics.enabled);
    assert!(validate_config(&config).is_ok());
  }

  #[test]
  fn partial_config_fills_defaults() {
    let config: AppConfig = toml::from_str(
      r#"
        [server]
        port = 4000
      "#,
    )
    .unwrap();

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.database.max_connections, 10);
    assert_eq!(config.metrics.push_interval_seconds, 30);
  }

  #[test]
  fn rejects_zero_pool_size() {
    let mut config = AppConfig::default();
    config.database.max_connections = 0;
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn rejects_empty_database_url() {
    let mut config = AppConfig::default();
    config.database.url = String::new();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn rejects_zero_port() {
    let mut config = AppConfig::default();
    config.server.port = 0;
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    // No config.toml in the test working directory tree with this name.
    let config = load_config("definitely-not-here.toml").unwrap();
    assert_eq!(config.service.name, "user-directory");
  }
}
