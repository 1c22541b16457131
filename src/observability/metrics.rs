//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_uploads_total` (counter): uploads by outcome and status
//! - `relay_upload_duration_seconds` (histogram): time to response head
//!
//! Outcomes are `mocks_enabled`, `rejected`, `unreachable` and `relayed`.
//! Without an installed recorder every update is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished upload.
pub fn record_upload(outcome: &'static str, status: u16, start: Instant) {
    counter!("relay_uploads_total", "outcome" => outcome, "status" => status.to_string())
        .increment(1);
    histogram!("relay_upload_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
