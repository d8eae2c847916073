//! Prometheus metrics setup and metric definitions

use anyhow::Context;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    // Prometheus defaults plus sub-millisecond buckets for in-memory reads
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup.
pub fn describe_metrics() {
    // HTTP metrics
    describe_counter!("configs_http_requests_total", "Total number of HTTP requests");
    describe_histogram!(
        "configs_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "configs_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    // Configuration metrics
    describe_counter!(
        "configs_patch_operations_total",
        "Patch requests by domain and outcome (applied/rejected)"
    );
    describe_counter!(
        "configs_domain_writes_total",
        "Persisted domain writes by kind (patch/replace/reset)"
    );

    counter!("configs_patch_operations_total", "domain" => "cors", "result" => "applied")
        .absolute(0);
    counter!("configs_domain_writes_total", "domain" => "cors", "kind" => "patch").absolute(0);
    histogram!(
        "configs_http_request_duration_seconds",
        "method" => "GET",
        "path" => "/health",
        "status" => "200"
    )
    .record(0.0);
    gauge!("configs_http_requests_in_flight").set(0.0);
}

/// Count one patch request against a domain
pub fn record_patch(domain: &'static str, applied: bool) {
    let result = if applied { "applied" } else { "rejected" };
    counter!("configs_patch_operations_total", "domain" => domain, "result" => result)
        .increment(1);
}

/// Count one persisted write
pub fn record_write(domain: &'static str, kind: &'static str) {
    counter!("configs_domain_writes_total", "domain" => domain, "kind" => kind).increment(1);
}
