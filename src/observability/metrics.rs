//! Metrics collection and exposition.
//!
//! # Metrics
//! - `shell_route_resolutions_total` (counter): rendered routes by name
//! - `shell_route_not_found_total` (counter): unmatched locations
//! - `shell_requests_total` (counter): shell responses by status
//! - `shell_request_duration_seconds` (histogram): request latency
//!
//! # Design Decisions
//! - Labels limited to route name and status code
//! - Exporter is optional; recording without one is a no-op

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

pub fn record_resolution(route: &str) {
    counter!("shell_route_resolutions_total", "route" => route.to_string()).increment(1);
}

pub fn record_not_found() {
    counter!("shell_route_not_found_total").increment(1);
}

pub fn record_request(status: u16, start: Instant) {
    counter!("shell_requests_total", "status" => status.to_string()).increment(1);
    histogram!("shell_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
