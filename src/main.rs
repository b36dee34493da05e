mod app_state;
mod card_number;
mod config;
mod db;
mod error;
mod handlers;
mod service;

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app_state::AppState;
use config::Config;
use db::{init_pool, repository::SqliteCardRepository};
use service::CardService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cards_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse configuration
    let config = Arc::new(Config::parse());

    // Initialize database
    let pool = init_pool(&config.database_url).await?;

    let cards = Arc::new(CardService::new(SqliteCardRepository::new(pool)));

    // Create shared state
    let state = AppState {
        config: config.clone(),
        cards,
    };

    let app = handlers::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.socket_addr()).await?;

    tracing::info!("Server running on {}", config.socket_addr());
    tracing::info!("Build version: {}", config.build_version);

    axum::serve(listener, app).await?;

    Ok(())
}
