//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Install the Prometheus exporter
//! - Record the outcome and latency of each evaluated request
//!
//! # Metrics
//! - `cdr_requests_total` (counter): evaluated requests by stage and status
//! - `cdr_validation_duration_seconds` (histogram): pipeline latency by stage
//!
//! # Design Decisions
//! - `stage` is the rejecting stage, or `pipeline` for requests that passed
//! - `status` is the rejection status code, or `pass`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Status label for requests that reached the handler.
pub const PASS: &str = "pass";

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, address = %addr, "Failed to install metrics exporter"),
    }
}

/// Record one pipeline evaluation.
pub fn record_evaluation(stage: &'static str, status: String, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    metrics::counter!("cdr_requests_total", "stage" => stage, "status" => status).increment(1);
    metrics::histogram!("cdr_validation_duration_seconds", "stage" => stage).record(elapsed);
}
