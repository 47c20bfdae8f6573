//! Metrics collection and exposition.
//!
//! # Metrics
//! - `directory_requests_total` (counter): requests by route, status
//! - `directory_request_duration_seconds` (histogram): latency by route
//! - `directory_leads_total` (counter): stored leads by subject
//! - `directory_lead_forward_failures_total` (counter): failed sheet appends
//!
//! # Design Decisions
//! - Prometheus exporter with its own HTTP listener
//! - Unmatched requests use the `none` route label

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "directory_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("directory_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_lead(subject: &str) {
    metrics::counter!("directory_leads_total", "subject" => subject.to_string()).increment(1);
}

pub fn record_forward_failure() {
    metrics::counter!("directory_lead_forward_failures_total").increment(1);
}
