//! Prometheus metrics for the challenger.
//!
//! All metrics are aggregated in the [`Metrics`] struct for easy tracking and management.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Aggregated metrics for the challenger.
///
/// Metrics are registered with the global metrics registry on creation. Recording
/// without an installed exporter is a no-op.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "challenger_cycles_total",
            "Total number of monitoring cycles executed, by result"
        );
        describe_histogram!(
            "challenger_cycle_duration_seconds",
            "Duration of each monitoring cycle in seconds"
        );
        describe_gauge!(
            "challenger_games_observed",
            "Number of dispute games returned by the last enumeration"
        );
        describe_counter!(
            "challenger_resolutions_total",
            "Resolution attempts by result"
        );
    }

    /// Record a completed cycle.
    pub fn record_cycle(&self, success: bool, duration: Duration) {
        let result = if success { "success" } else { "failure" };
        counter!("challenger_cycles_total", "result" => result).increment(1);
        histogram!("challenger_cycle_duration_seconds").record(duration.as_secs_f64());
    }

    /// Set the number of games seen by the last enumeration.
    pub fn set_games_observed(&self, count: usize) {
        gauge!("challenger_games_observed").set(count as f64);
    }

    /// Record the result of a resolution pass for one game.
    pub fn record_resolution(&self, result: &'static str) {
        counter!("challenger_resolutions_total", "result" => result).increment(1);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
