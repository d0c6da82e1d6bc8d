//! Metrics collection and exposition.
//!
//! # Metrics
//! - `transfer_requests_total` (counter): requests by outcome code
//! - `transfer_duration_seconds` (histogram): end-to-end handler latency
//! - `ledger_rpc_errors_total` (counter): failed ledger calls by method
//! - `bundle_submissions_total` (counter): relay submissions by result (accepted, rejected, error)
//!
//! # Design Decisions
//! - Uses the `metrics` facade; recording is a no-op until an exporter is installed
//! - Prometheus exporter runs on its own listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished transfer request.
pub fn record_transfer(outcome: &'static str, start: Instant) {
    metrics::counter!("transfer_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("transfer_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_rpc_error(method: &'static str) {
    metrics::counter!("ledger_rpc_errors_total", "method" => method).increment(1);
}

/// `result` is `accepted`, `rejected` or `error`.
pub fn record_bundle_submission(result: &'static str) {
    metrics::counter!("bundle_submissions_total", "result" => result).increment(1);
}
