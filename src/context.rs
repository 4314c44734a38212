/// Application context and dependency injection
use crate::{
    config::ServerConfig,
    db,
    error::PhotoResult,
    photos::{seed, PhotoRepository},
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    pub db: SqlitePool,
    pub photos: PhotoRepository,
}

impl AppContext {
    /// Open the store and bootstrap it from configuration
    pub async fn new(config: ServerConfig) -> PhotoResult<Self> {
        // Validate configuration
        config.validate()?;

        let options = db::DatabaseOptions {
            max_connections: config.storage.max_connections,
            ..Default::default()
        };
        let pool = db::create_pool(&config.storage.database_path, options).await?;
        db::test_connection(&pool).await?;

        tracing::info!("Opened photo store at {:?}", config.storage.database_path);

        Self::with_pool(config, pool).await
    }

    /// Build the context over an already opened pool
    pub async fn with_pool(config: ServerConfig, pool: SqlitePool) -> PhotoResult<Self> {
        db::ensure_schema(&pool).await?;

        let photos = PhotoRepository::new(pool.clone());
        if config.storage.seed {
            seed::seed_if_empty(&photos).await?;
        }

        Ok(Self {
            config: Arc::new(config),
            db: pool,
            photos,
        })
    }
}
