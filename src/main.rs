use std::sync::Arc;

use restaurant_api::clock::SystemClock;
use restaurant_api::{app, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, STORAGE_BACKEND, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("restaurant_api=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = restaurant_api::config::config();
    tracing::info!(
        "Starting Restaurant API in {:?} mode with {:?} storage",
        config.environment,
        config.database.backend
    );

    let state = AppState::from_config(config, Arc::new(SystemClock)).await?;
    let router = app(state, config.security.enable_cors);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Restaurant API listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
