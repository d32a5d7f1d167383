//! Prometheus metrics for monitoring bracket server health and activity.
//!
//! Metrics are exposed in Prometheus text format on a separate listener
//! when `METRICS_BIND` (or `--metrics-bind`) is set. Without an installed
//! exporter every recording call is a no-op.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use bracket_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("POST", "/api/v1/tournaments/{tournament_id}/bracket", 200);
//! metrics::brackets_generated_total();
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Bracket Metrics
// ============================================================================

/// Increment generated brackets counter.
pub fn brackets_generated_total() {
    metrics::counter!("brackets_generated_total").increment(1);
}

/// Record bracket size distribution.
pub fn bracket_participants(count: usize) {
    metrics::histogram!("bracket_participants").record(count as f64);
}

/// Increment recorded results counter.
pub fn results_recorded_total(tie: bool) {
    metrics::counter!("results_recorded_total",
        "tie" => tie.to_string()
    )
    .increment(1);
}

/// Increment completed tournaments counter.
pub fn tournaments_completed_total() {
    metrics::counter!("tournaments_completed_total").increment(1);
}

/// Set current running tournament actors count.
pub fn active_tournaments(count: usize) {
    metrics::gauge!("active_tournaments").set(count as f64);
}
