use std::net::SocketAddr;

use anyhow::Context;
use fareday_api::{app, AppState};
use fareday_store::{app_config::Config, Artifacts};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fareday_api=debug,fareday_forecast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("failed to load config")?;
    let artifacts = Artifacts::load(&config.artifacts).context("failed to load model artifacts")?;

    let app = app(AppState::from_artifacts(artifacts, config.server.max_horizon_days));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
