use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

/// The recorder is process-global; routers built later (tests build many)
/// share the first handle.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once) and describe our series.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| {
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("prometheus: install recorder")?;
                describe();
                Ok::<_, anyhow::Error>(handle)
            })?
            .clone();
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

fn describe() {
    describe_counter!(
        "bias_articles_scored_total",
        "Articles scored, labelled by bias bucket."
    );
    describe_counter!(
        "news_upstream_requests_total",
        "Calls made to the upstream news API."
    );
    describe_counter!(
        "news_upstream_errors_total",
        "Failed calls to the upstream news API."
    );
    describe_counter!(
        "news_mock_fallback_total",
        "Responses served from mock data after an upstream failure."
    );
    describe_histogram!("news_upstream_ms", "Upstream news API latency in milliseconds.");
    describe_gauge!("saved_articles", "Articles currently in the saved-article store.");
}
