//! News Bias Service: binary entrypoint.
//! Boots the Axum HTTP server: env config, bias lexicon (with optional hot
//! reload), NewsAPI client and the route table.

use news_bias_service::api::{self, AppState};
use news_bias_service::bias::lexicon::{lexicon_path_from_env, start_hot_reload_thread};
use news_bias_service::telemetry::is_dev_env;
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - BIAS_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("BIAS_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    if !(dev_flag && is_dev_env()) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bias=info,news=info,warn"));

    // Shuttle may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let state = AppState::from_env()?;

    // No-op unless BIAS_LEXICON_HOT_RELOAD=1 in a dev environment.
    start_hot_reload_thread(state.lexicon.clone(), lexicon_path_from_env());

    tracing::info!(target: "news", provider = state.news.name(), "news provider ready");

    let router = api::router(state);
    Ok(router.into())
}
