//! Prometheus metrics for poll health and snapshot turnover.
//!
//! This module provides metrics for:
//! - Snapshot fetch latency
//! - Poll attempts and failures
//! - Snapshots adopted, fallback substitutions and discarded stale outcomes

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, info};

use crate::error::ViewerError;

// === Metric Name Constants ===

/// Snapshot fetch latency metric name.
pub const METRIC_POLL_LATENCY: &str = "book_poll_latency_ms";
/// Poll attempts counter metric name.
pub const METRIC_POLLS: &str = "book_polls_total";
/// Failed polls counter metric name.
pub const METRIC_POLL_FAILURES: &str = "book_poll_failures_total";
/// Adopted snapshots counter metric name.
pub const METRIC_SNAPSHOTS_APPLIED: &str = "book_snapshots_applied_total";
/// Fallback substitutions counter metric name.
pub const METRIC_FALLBACK_APPLIED: &str = "book_fallback_applied_total";
/// Out-of-order outcomes counter metric name.
pub const METRIC_STALE_OUTCOMES: &str = "book_stale_outcomes_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_POLL_LATENCY,
        "Snapshot fetch and parse latency in milliseconds"
    );

    describe_counter!(METRIC_POLLS, "Total number of snapshot polls started");
    describe_counter!(
        METRIC_POLL_FAILURES,
        "Total number of snapshot polls that failed"
    );
    describe_counter!(
        METRIC_SNAPSHOTS_APPLIED,
        "Total number of snapshots adopted for display"
    );
    describe_counter!(
        METRIC_FALLBACK_APPLIED,
        "Total number of times the built-in snapshot was substituted"
    );
    describe_counter!(
        METRIC_STALE_OUTCOMES,
        "Total number of poll outcomes discarded as out of order"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder with a scrape listener on `port`.
pub fn install_exporter(port: u16) -> Result<(), ViewerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ViewerError::Metrics(e.to_string()))?;
    info!("Metrics listener on {}", addr);
    Ok(())
}

/// Increment polls counter.
pub fn inc_polls() {
    counter!(METRIC_POLLS).increment(1);
}

/// Increment failed polls counter.
pub fn inc_poll_failures() {
    counter!(METRIC_POLL_FAILURES).increment(1);
}

/// Increment adopted snapshots counter.
pub fn inc_snapshots_applied() {
    counter!(METRIC_SNAPSHOTS_APPLIED).increment(1);
}

/// Increment fallback substitutions counter.
pub fn inc_fallback_applied() {
    counter!(METRIC_FALLBACK_APPLIED).increment(1);
}

/// Increment discarded stale outcomes counter.
pub fn inc_stale_outcomes() {
    counter!(METRIC_STALE_OUTCOMES).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for one snapshot fetch.
pub fn timer_poll() -> LatencyTimer {
    LatencyTimer::new(METRIC_POLL_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("test_metric");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0);
    }

    #[test]
    fn counters_without_recorder_are_noops() {
        init_metrics();
        inc_polls();
        inc_poll_failures();
        inc_snapshots_applied();
        drop(timer_poll());
    }
}
