//! Prometheus metrics for post-service.
//!
//! Exposes HTTP and resource-operation collectors and an HTTP handler for
//! the `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Requests served, by method, route pattern and status code.
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total HTTP requests segmented by method, route and status",
        &["method", "path", "status"]
    )
    .expect("failed to register http_requests_total");

    /// Request latency by method and route pattern.
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration segmented by method and route",
        &["method", "path"]
    )
    .expect("failed to register http_request_duration_seconds");

    /// Resource controller operations by resource, operation and outcome (ok/error).
    pub static ref RESOURCE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "resource_operations_total",
        "Resource controller operations segmented by outcome",
        &["resource", "operation", "outcome"]
    )
    .expect("failed to register resource_operations_total");
}

/// Count one controller operation.
pub fn record_operation(resource: &str, operation: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    RESOURCE_OPERATIONS_TOTAL
        .with_label_values(&[resource, operation, outcome])
        .inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
