//! Metrics registry
//!
//! Defines all Prometheus metrics used in the application. Each `Metrics`
//! owns its registry, so the server and tests never share counters.

use prometheus::{
    Counter, CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

use crate::errors::{LinkmeterError, Result};
use crate::metrics_core::MetricsRecorder;

/// Latency buckets in seconds; the service answers from memory, so the low
/// end is dense.
const LATENCY_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
];

/// Application metrics container
pub struct Metrics {
    /// Internal Prometheus registry
    registry: Registry,

    // ===== Business metrics =====
    /// Total number of short links created
    pub links_created_total: Counter,
    /// Total number of successful redirects
    pub redirects_total: Counter,
    /// Links currently held by the store (refreshed on scrape)
    pub links_stored: Gauge,

    // ===== HTTP metrics =====
    /// Requests by method, endpoint and status
    pub http_requests_total: CounterVec,
    /// Request latency by method, endpoint and status
    pub http_request_duration_seconds: HistogramVec,
    /// Request latency by method and endpoint, under the name dashboards query
    pub request_latency_seconds: HistogramVec,
    /// Requests currently in flight
    pub http_active_connections: Gauge,

    // ===== System metrics =====
    /// Server uptime in seconds
    pub uptime_seconds: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let links_created_total = Counter::new(
            "links_criados_total",
            "Total number of new short links created",
        )?;

        let redirects_total =
            Counter::new("redirecionamentos_total", "Total number of links redirected")?;

        let links_stored = Gauge::new("links_stored", "Number of short links currently stored")?;

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "endpoint", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "endpoint", "status"],
        )?;

        let request_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "app_request_latency_seconds",
                "Request latency in seconds by method and endpoint",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "endpoint"],
        )?;

        let http_active_connections = Gauge::new(
            "http_active_connections",
            "Number of HTTP requests currently being served",
        )?;

        let uptime_seconds = Gauge::new("app_uptime_seconds", "Server uptime in seconds")?;

        registry.register(Box::new(links_created_total.clone()))?;
        registry.register(Box::new(redirects_total.clone()))?;
        registry.register(Box::new(links_stored.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(request_latency_seconds.clone()))?;
        registry.register(Box::new(http_active_connections.clone()))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry,
            links_created_total,
            redirects_total,
            links_stored,
            http_requests_total,
            http_request_duration_seconds,
            request_latency_seconds,
            http_active_connections,
            uptime_seconds,
        })
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| LinkmeterError::metrics(format!("Metrics output is not valid UTF-8: {}", e)))
    }
}

impl MetricsRecorder for Metrics {
    fn inc_links_created(&self) {
        self.links_created_total.inc();
    }

    fn inc_redirects(&self) {
        self.redirects_total.inc();
    }

    fn inc_active_connections(&self) {
        self.http_active_connections.inc();
    }

    fn dec_active_connections(&self) {
        self.http_active_connections.dec();
    }

    fn observe_http_request(&self, method: &str, endpoint: &str, status: &str, duration_secs: f64) {
        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint, status])
            .observe(duration_secs);
    }

    fn inc_http_request(&self, method: &str, endpoint: &str, status: &str) {
        self.http_requests_total
            .with_label_values(&[method, endpoint, status])
            .inc();
    }

    fn observe_request_latency(&self, method: &str, endpoint: &str, duration_secs: f64) {
        self.request_latency_seconds
            .with_label_values(&[method, endpoint])
            .observe(duration_secs);
    }
}
