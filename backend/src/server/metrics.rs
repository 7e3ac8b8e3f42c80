//! Prometheus request metrics served on `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

const NAMESPACE: &str = "todo_backend";
const ENDPOINT: &str = "/metrics";

/// Build the request-metrics middleware.
///
/// # Errors
/// Returns [`std::io::Error`] when the metric registry rejects a collector.
pub(super) fn request_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(err.to_string()))
}
