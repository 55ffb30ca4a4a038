//! Metrics collection and exposition.
//!
//! # Metrics
//! - `address_requests_total` (counter): requests by method, status
//! - `address_request_duration_seconds` (histogram): latency by method
//! - `address_store_records` (gauge): current store size
//! - `address_auth_failures_total` (counter): rejected credentials
//! - `address_validation_failures_total` (counter): rejected payloads by field
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter, serving scrapes on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "address_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("address_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_size(len: usize) {
    gauge!("address_store_records").set(len as f64);
}

pub fn record_auth_failure() {
    counter!("address_auth_failures_total").increment(1);
}

pub fn record_validation_failure(field: &'static str) {
    counter!("address_validation_failures_total", "field" => field).increment(1);
}

/// Middleware recording request count and latency.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
