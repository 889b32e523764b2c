//! Finsight API Server
//!
//! Main entry point for the Finsight analytics backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finsight_api::{AppState, create_router};
use finsight_core::cache::QueryCache;
use finsight_core::queries::QueryLibrary;
use finsight_db::{SeaOrmFactSource, connect};
use finsight_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finsight=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database).await?;

    // Result cache shared by every request
    let cache = QueryCache::with_config(
        Duration::from_secs(config.cache.default_ttl_secs),
        config.cache.max_capacity,
    );
    info!(
        ttl_secs = config.cache.default_ttl_secs,
        max_capacity = ?config.cache.max_capacity,
        "Query cache configured"
    );

    // Create application state
    let analytics = QueryLibrary::new(Arc::new(SeaOrmFactSource::new(db)), cache);
    let state = AppState::new(analytics, config.dashboard.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
