//! Credibility engine service: binary entrypoint.
//! Boots the Axum HTTP server, wiring config, shared engine state, and metrics.

use credibility_engine::{api, config::EngineConfig, metrics::Metrics, pipeline::Engine};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs by default, JSON with `LOG_FORMAT=json`. The runtime may have
/// installed a subscriber already, in which case this is a no-op.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("credibility_engine=info,warn"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = EngineConfig::load().map_err(anyhow::Error::from)?;
    tracing::info!(
        development_mode = cfg.development_mode,
        provider_timeout_ms = cfg.provider_timeout_ms,
        tei = cfg.tei_url.is_some(),
        "engine config loaded"
    );

    let engine = Engine::from_config(&cfg);
    let mut router = api::router(api::AppState::new(engine));

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => tracing::warn!(error = %e, "metrics exporter not installed"),
    }

    Ok(router.into())
}
