//! Shared application state passed to the route builders.

use std::sync::Arc;

use mongodb::{Client, Database};
use storage::ObjectStore;

/// Shared application state.
///
/// Cloning is cheap: the MongoDB client and object store are handles over
/// shared connection pools.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// Object storage backend selected by configuration
    pub store: Arc<dyn ObjectStore>,
}
