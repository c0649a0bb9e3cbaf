//! # Metrics Collection Module
//!
//! Prometheus metrics for proxied traffic, exposed at `GET /metrics`.
//!
//! **Counters:**
//! - `relay_requests_total{method, status}` - Proxied requests by final status
//! - `relay_errors_total{kind}` - `upstream_status`, `transport`, `body_parse`, `internal`
//!
//! **Histograms:**
//! - `relay_request_duration_seconds{method}` - Time until the response head is ready

pub mod handler;

pub use metrics_exporter_prometheus::PrometheusBuilder;

use std::time::{Duration, Instant};

/// Name of the per-request counter.
pub const REQUESTS_TOTAL: &str = "relay_requests_total";
/// Name of the request duration histogram.
pub const REQUEST_DURATION_SECONDS: &str = "relay_request_duration_seconds";
/// Name of the error counter.
pub const ERRORS_TOTAL: &str = "relay_errors_total";

/// Error categories recorded under `relay_errors_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Upstream answered with a non-2xx status
    UpstreamStatus,
    /// Upstream could not be reached or failed mid-call
    Transport,
    /// Inbound body was empty or not JSON
    BodyParse,
    /// Anything else that ended in the proxy's own 500
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UpstreamStatus => "upstream_status",
            ErrorKind::Transport => "transport",
            ErrorKind::BodyParse => "body_parse",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Holds the Prometheus handle and process start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(
        start_time: Instant,
        prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Record one completed proxy request.
    pub fn record_request(&self, method: &str, status: u16, elapsed: Duration) {
        metrics::counter!(REQUESTS_TOTAL,
            "method" => method.to_string(),
            "status" => status.to_string()
        )
        .increment(1);

        metrics::histogram!(REQUEST_DURATION_SECONDS,
            "method" => method.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    /// Record one error of the given kind.
    pub fn record_error(&self, kind: ErrorKind) {
        metrics::counter!(ERRORS_TOTAL, "kind" => kind.as_str()).increment(1);
    }

    /// Get uptime in seconds since startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Install the global Prometheus recorder with relay histogram buckets.
///
/// Fails if a global recorder is already installed.
pub fn setup_metrics(
) -> Result<metrics_exporter_prometheus::PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    // Webhook workflows take anywhere from milliseconds to tens of seconds.
    let duration_buckets = &[
        0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Install the global recorder, or fall back to a detached handle when one
/// is already installed (several `AppState`s in one process).
pub fn setup_or_detached() -> metrics_exporter_prometheus::PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detached_collector() -> MetricsCollector {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        MetricsCollector::new(Instant::now(), handle)
    }

    #[test]
    fn test_metrics_collector_construction() {
        let collector = detached_collector();
        assert!(collector.uptime_seconds() < 1);
    }

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(ErrorKind::UpstreamStatus.as_str(), "upstream_status");
        assert_eq!(ErrorKind::Transport.as_str(), "transport");
        assert_eq!(ErrorKind::BodyParse.as_str(), "body_parse");
        assert_eq!(ErrorKind::Internal.as_str(), "internal");
    }

    #[test]
    fn test_record_without_global_recorder_is_noop() {
        let collector = detached_collector();
        collector.record_request("GET", 200, Duration::from_millis(5));
        collector.record_error(ErrorKind::Transport);
        assert!(!collector.render_metrics().contains(REQUESTS_TOTAL));
    }
}
