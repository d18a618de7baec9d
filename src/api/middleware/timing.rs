//! HTTP timing middleware
//!
//! Records HTTP request duration, request count, and in-flight requests
//! through the injected `MetricsRecorder`.

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use crate::metrics_core::MetricsRecorder;
use crate::utils::{is_reserved_short_code, is_valid_short_code};

/// Drop guard that decrements active connections when dropped.
/// Ensures `dec` runs even if the future panics or is cancelled.
struct ActiveConnectionGuard {
    metrics: Arc<dyn MetricsRecorder>,
}

impl ActiveConnectionGuard {
    fn enter(metrics: Arc<dyn MetricsRecorder>) -> Self {
        metrics.inc_active_connections();
        Self { metrics }
    }
}

impl Drop for ActiveConnectionGuard {
    fn drop(&mut self) {
        self.metrics.dec_active_connections();
    }
}

/// HTTP timing middleware factory
#[derive(Clone)]
pub struct TimingMiddleware {
    metrics: Arc<dyn MetricsRecorder>,
}

impl TimingMiddleware {
    pub fn new(metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let metrics = self.metrics.clone();
        let start = Instant::now();

        // Labels are static strings (avoid String allocation)
        let method = method_str(req.method());
        let endpoint = classify_endpoint(req.path());

        Box::pin(async move {
            let _guard = ActiveConnectionGuard::enter(metrics.clone());

            let result = srv.call(req).await;

            let duration = start.elapsed().as_secs_f64();
            let status = match &result {
                Ok(response) => status_str(response.status()),
                Err(_) => "500",
            };

            metrics.observe_http_request(method, endpoint, status, duration);
            metrics.observe_request_latency(method, endpoint, duration);
            metrics.inc_http_request(method, endpoint, status);

            result
        })
    }
}

/// Map HTTP method to a static string (avoids allocation).
fn method_str(method: &actix_web::http::Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        "PATCH" => "PATCH",
        _ => "OTHER",
    }
}

/// Map HTTP status code to a static string (avoids allocation for common codes).
fn status_str(status: actix_web::http::StatusCode) -> &'static str {
    match status.as_u16() {
        200 => "200",
        201 => "201",
        204 => "204",
        302 => "302",
        304 => "304",
        400 => "400",
        404 => "404",
        405 => "405",
        413 => "413",
        500 => "500",
        503 => "503",
        _ => "other",
    }
}

/// Classify request path into endpoint category
///
/// Short codes never become label values, which keeps the label
/// cardinality bounded.
pub fn classify_endpoint(path: &str) -> &'static str {
    match path {
        "/encurtar" | "/shorten" => "shorten",
        "/metrics" => "metrics",
        "/health" => "health",
        "/api/links" => "links",
        _ if path.starts_with("/api/links/") => "links",
        _ => {
            let segment = path.strip_prefix('/').unwrap_or(path);
            if is_valid_short_code(segment) && !is_reserved_short_code(segment) {
                "redirect"
            } else {
                "other"
            }
        }
    }
}
