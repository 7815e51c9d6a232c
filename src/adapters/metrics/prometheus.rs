//! Prometheus Metrics Registry - Request Observability
//!
//! Registers and exposes the HTTP request counter plus default process
//! metrics (memory, CPU, fds) for scraping via `/metrics`. The
//! registry is explicitly constructed at startup and injected into the
//! router state; nothing uses the global default registry.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Centralized Prometheus metrics for the service.
///
/// Metric names match the exposition the service has always produced:
/// `http_requests_total` labeled by method, route template, and status.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Total handled HTTP requests counter.
    pub http_requests: IntCounterVec,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    ///
    /// On Linux this also registers the process collector, covering
    /// the default process metrics (resident memory, CPU time, open
    /// fds, process start time).
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests handled"),
            &["method", "route", "status_code"],
        )?;

        registry.register(Box::new(http_requests.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            http_requests,
        })
    }

    /// Count one handled request with its real response status.
    pub fn observe_request(&self, method: &str, route: &str, status: u16) {
        self.http_requests
            .with_label_values(&[method, route, status.to_string().as_str()])
            .inc();
    }

    /// Serialize the registry in text exposition format.
    pub fn encode(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
