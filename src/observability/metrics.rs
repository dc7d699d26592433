//! Metrics collection and exposition.
//!
//! # Metrics
//! - `commute_requests_total` (counter): requests by endpoint, status
//! - `commute_request_duration_seconds` (histogram): handler latency
//! - `commute_upstream_duration_seconds` (histogram): provider latency by provider, outcome
//! - `commute_history_writes_total` (counter): search log writes by outcome
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!("commute_requests_total", "endpoint" => endpoint, "status" => status).increment(1);
    histogram!("commute_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream(provider: &'static str, ok: bool, start: Instant) {
    let outcome = if ok { "ok" } else { "error" };
    histogram!(
        "commute_upstream_duration_seconds",
        "provider" => provider,
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_history_write(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("commute_history_writes_total", "outcome" => outcome).increment(1);
}
