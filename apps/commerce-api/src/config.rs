//! Application configuration loaded from environment variables.

use core_config::server::ServerConfig;
use core_config::{app_info, AppInfo, Environment, FromEnv};
use database::mongodb::MongoConfig;
use storage::StorageConfig;

/// Complete configuration for the commerce API.
#[derive(Clone, Debug)]
pub struct Config {
    /// Application name and version, baked in at compile time
    pub app: AppInfo,
    /// MongoDB connection settings
    pub mongodb: MongoConfig,
    /// HTTP server bind settings
    pub server: ServerConfig,
    /// Object storage backend settings
    pub storage: StorageConfig,
    /// Deployment environment (development or production)
    pub environment: Environment,
}

impl Config {
    /// Load the full configuration from environment variables.
    ///
    /// Required: `MONGODB_URL`, `MONGODB_DATABASE`. The storage backend
    /// defaults to local disk; set `STORAGE_BACKEND=remote` together with
    /// `STORAGE_ENDPOINT` and `STORAGE_API_KEY` for the remote media
    /// service.
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
