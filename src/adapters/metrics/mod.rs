//! Metrics and Monitoring Adapters
//!
//! Provides the process-wide Prometheus registry behind `/metrics`
//! and an optional remote-write push task for setups where the
//! monitoring system cannot scrape the service.

pub mod prometheus;
pub mod push;

pub use prometheus::MetricsRegistry;
pub use push::{MetricsPusher, PushConfig};
