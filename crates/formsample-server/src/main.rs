mod app;
mod handlers;

use anyhow::{Context, Result};
use formsample::{Config, JsonFetcher, PageRoute};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = Config::load_default().context("Failed to load config")?;

    info!(
        port = config.server.port,
        validation_mode = ?config.forms.validation_mode,
        resource = %config.fetch.post_url(config.fetch.post_id),
        "formsample starting"
    );
    for route in PageRoute::ALL {
        info!("  {} -> {}", route.path(), route.title());
    }

    let fetcher = JsonFetcher::new(&config.fetch.user_agent)?;
    let state = app::AppState::new(config.clone(), Arc::new(fetcher));
    let router = app::build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
