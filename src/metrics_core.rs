//! Core metrics traits (always compiled, no feature gate).
//!
//! Provides `MetricsRecorder` trait and `NoopMetrics` so that all modules
//! can accept `Arc<dyn MetricsRecorder>` unconditionally.  When the
//! `metrics` feature is disabled, `NoopMetrics` is injected and every call
//! becomes a no-op.

use std::sync::Arc;

/// Trait for recording application metrics.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync).
#[allow(unused_variables)]
pub trait MetricsRecorder: Send + Sync {
    // ===== Business counters =====

    /// Record a successfully created short link
    fn inc_links_created(&self) {}

    /// Record a successful redirect
    fn inc_redirects(&self) {}

    // ===== HTTP (timing middleware) =====

    /// Increment active connections counter
    fn inc_active_connections(&self) {}

    /// Decrement active connections counter
    fn dec_active_connections(&self) {}

    /// Observe HTTP request duration
    fn observe_http_request(&self, method: &str, endpoint: &str, status: &str, duration_secs: f64) {
    }

    /// Record HTTP request
    fn inc_http_request(&self, method: &str, endpoint: &str, status: &str) {}

    /// Observe request latency without the status dimension
    fn observe_request_latency(&self, method: &str, endpoint: &str, duration_secs: f64) {}
}

/// Noop metrics implementation for testing and non-metrics builds.
pub struct NoopMetrics;

impl MetricsRecorder for NoopMetrics {}

impl NoopMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn arc() -> Arc<dyn MetricsRecorder> {
        Arc::new(Self::new())
    }
}

impl Default for NoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
