/// Configuration management for the photo catalog
use crate::error::{PhotoError, PhotoResult};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
    /// Insert the sample records when the store is empty
    pub seed: bool,
}

/// Cross-origin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// The single origin allowed to make credentialed requests
    pub allowed_origin: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> PhotoResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("PHOTOS_HOSTNAME").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PHOTOS_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| PhotoError::Config("Invalid port number".to_string()))?;

        let database_path = env::var("PHOTOS_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./photos.db"));
        let max_connections = env::var("PHOTOS_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| PhotoError::Config("Invalid connection count".to_string()))?;
        let seed = parse_seed(&env::var("PHOTOS_SEED").unwrap_or_else(|_| "true".to_string()))?;

        let allowed_origin = env::var("PHOTOS_CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(ServerConfig {
            service: ServiceConfig { hostname, port },
            storage: StorageConfig {
                database_path,
                max_connections,
                seed,
            },
            cors: CorsConfig { allowed_origin },
            logging: LoggingConfig { level: log_level },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> PhotoResult<()> {
        if self.service.hostname.is_empty() {
            return Err(PhotoError::Config("Hostname cannot be empty".to_string()));
        }

        if self.storage.max_connections == 0 {
            return Err(PhotoError::Config(
                "Connection pool needs at least one connection".to_string(),
            ));
        }

        self.cors_origin()?;

        Ok(())
    }

    /// Allowed CORS origin as a header value
    pub fn cors_origin(&self) -> PhotoResult<HeaderValue> {
        HeaderValue::from_str(&self.cors.allowed_origin).map_err(|_| {
            PhotoError::Config(format!(
                "Invalid CORS origin: {}",
                self.cors.allowed_origin
            ))
        })
    }

    /// Bind address for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.hostname, self.service.port)
    }
}

/// Only `true` or `false`; anything else is a config error
fn parse_seed(value: &str) -> PhotoResult<bool> {
    value
        .trim()
        .parse()
        .map_err(|_| PhotoError::Config(format!("Invalid PHOTOS_SEED value: {:?}", value)))
}

#[cfg(test)]
impl ServerConfig {
    /// Config pointing at the given database file, seeding disabled
    pub fn for_tests(database_path: PathBuf) -> Self {
        ServerConfig {
            service: ServiceConfig {
                hostname: "127.0.0.1".to_string(),
                port: 0,
            },
            storage: StorageConfig {
                database_path,
                max_connections: 1,
                seed: false,
            },
            cors: CorsConfig {
                allowed_origin: "http://localhost:5173".to_string(),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        }
    }
}
