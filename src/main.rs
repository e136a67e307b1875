//! Sentiment service binary entrypoint.
//! Loads config, builds the scorer and serves the Axum router.

use anyhow::{Context, Result};
use tracing::info;

use polyglot_sentiment::{api, config::ServiceConfig, metrics::Metrics, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let config = ServiceConfig::load_default()?;
    let scorer = config.build_scorer()?;

    let mut app = api::router(scorer);
    if config.metrics {
        let metrics = Metrics::install()?;
        app = app.merge(metrics.router());
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, metrics = config.metrics, "sentiment service listening");

    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}
