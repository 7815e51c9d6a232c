//! Metrics Push Task - Remote-Write for Scrape-less Deployments
//!
//! Periodically POSTs the text exposition to a remote endpoint with
//! basic auth. Intended for platforms where the monitoring system
//! cannot reach the service to scrape `/metrics`. Disabled unless all
//! push credentials are present in the environment.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::prometheus::MetricsRegistry;
use crate::config::MetricsConfig;

/// Push endpoint configuration.
///
/// Credentials come from the environment only (`GRAFANA_PUSH_URL`,
/// `GRAFANA_USERNAME`, `GRAFANA_API_KEY`); timing comes from the
/// `[metrics]` config table.
#[derive(Debug, Clone)]
pub struct PushConfig {
    /// Remote-write endpoint URL.
    pub url: String,
    /// Basic auth username.
    pub username: String,
    /// Basic auth password / API key.
    pub api_key: String,
    /// Interval between pushes.
    pub interval: Duration,
    /// Per-request timeout (the push is the only bounded-time outbound
    /// operation in the service).
    pub timeout: Duration,
    /// Retries per push before waiting for the next interval.
    pub max_retries: u32,
}

impl PushConfig {
    /// Build from the environment, or `None` when any credential is
    /// missing (push stays disabled, matching an unconfigured deploy).
    pub fn from_env(metrics: &MetricsConfig) -> Option<Self> {
        Self::from_env_vars(
            std::env::var("GRAFANA_PUSH_URL").ok(),
            std::env::var("GRAFANA_USERNAME").ok(),
            std::env::var("GRAFANA_API_KEY").ok(),
            metrics,
        )
    }

    /// Testable core of [`PushConfig::from_env`].
    fn from_env_vars(
        url: Option<String>,
        username: Option<String>,
        api_key: Option<String>,
        metrics: &MetricsConfig,
    ) -> Option<Self> {
        match (url, username, api_key) {
            (Some(url), Some(username), Some(api_key))
                if !url.is_empty() && !username.is_empty() && !api_key.is_empty() =>
            {
                Some(Self {
                    url,
                    username,
                    api_key,
                    interval: Duration::from_secs(metrics.push_interval_seconds),
                    timeout: Duration::from_millis(metrics.push_timeout_ms),
                    max_retries: metrics.push_max_retries,
                })
            }
            _ => None,
        }
    }
}

/// Background task pushing the exposition on a fixed interval.
pub struct MetricsPusher {
    /// Underlying HTTP client.
    http: Client,
    /// Registry to snapshot on every tick.
    registry: Arc<MetricsRegistry>,
    /// Endpoint, credentials, and timing.
    config: PushConfig,
}

impl MetricsPusher {
    /// Create a new pusher.
    pub fn new(registry: Arc<MetricsRegistry>, config: PushConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build push HTTP client")?;

        Ok(Self {
            http,
            registry,
            config,
        })
    }

    /// Run until shutdown, pushing once per interval.
    ///
    /// A failed push is logged and dropped; the next interval starts
    /// from a clean slate. Push failures never affect request serving.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            url = %self.config.url,
            interval_secs = self.config.interval.as_secs(),
            "Metrics push task started"
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    info!("Metrics push task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.push_once().await {
                        warn!(error = %e, "Metrics push failed");
                    }
                }
            }
        }

        Ok(())
    }

    /// Push the current exposition, retrying with exponential backoff.
    async fn push_once(&self) -> Result<()> {
        let body = self.registry.encode()?;
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(200 * 2u64.pow(attempt - 1));
                sleep(delay).await;
            }

            let result = self
                .http
                .post(&self.config.url)
                .basic_auth(&self.config.username, Some(&self.config.api_key))
                .header("Content-Type", "text/plain; version=0.0.4")
                .body(body.clone())
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    debug!(bytes = body.len(), "Metrics pushed");
                    return Ok(());
                }
                Ok(response) => {
                    last_error = Some(anyhow::anyhow!(
                        "Push endpoint returned {}",
                        response.status()
                    ));
                }
                Err(e) => {
                    last_error = Some(anyhow::Error::new(e).context("Push request failed"));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Push failed")))
    }
}
