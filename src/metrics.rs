use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("scoring_requests_total", "Claims scored.");
        describe_counter!(
            "signal_failures_total",
            "Signal computations that failed and fell back to the default."
        );
        describe_histogram!("scoring_final_score", "Final credibility score per claim.");
        describe_counter!("factcheck_cache_hits_total", "Fact-check results served from cache.");
        describe_counter!(
            "factcheck_cache_misses_total",
            "Fact-check lookups that had to call providers."
        );
        describe_counter!(
            "factcheck_provider_errors_total",
            "Fact-check provider failures and timeouts."
        );
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder. Only one recorder may exist per process.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
