//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by method and status
//! - `router_resolve_duration_seconds` (histogram): time from dispatch to response
//! - `router_routes` (gauge): routes in the active table
//! - `router_reloads_total` (counter): table reloads by outcome
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Prometheus exporter only when enabled in config

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("router_resolve_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_routes(count: usize) {
    gauge!("router_routes").set(count as f64);
}

pub fn record_reload(outcome: &'static str) {
    counter!("router_reloads_total", "outcome" => outcome).increment(1);
}
