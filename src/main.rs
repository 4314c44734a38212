/// Photo Catalog
///
/// HTTP service for creating, listing, showing and updating photo
/// metadata records kept in a local SQLite file.

mod api;
mod config;
mod context;
mod db;
mod error;
mod photos;
mod server;

use config::ServerConfig;
use context::AppContext;
use error::PhotoResult;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> PhotoResult<()> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("photo_catalog={0},tower_http={0}", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the store, create the schema and seed it
    let ctx = AppContext::new(config).await?;

    server::serve(ctx).await?;

    Ok(())
}
