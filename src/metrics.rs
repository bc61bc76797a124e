use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("settlement_runs_total").absolute(0);
    counter!("questions_resolved_total").absolute(0);
    counter!("questions_skipped_total").absolute(0);
    counter!("quizzes_settled_total").absolute(0);
    counter!("gateway_errors_total").absolute(0);

    handle
}
