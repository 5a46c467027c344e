//! Object storage for product media.
//!
//! A single [`ObjectStore`] trait fronts two interchangeable backends:
//!
//! - [`HttpObjectStore`]: streams buffers to a remote media service over
//!   HTTP and returns the durable URL the service reports back.
//! - [`LocalObjectStore`]: writes buffers under a local media root and
//!   returns a URL assembled from a configured public base.
//!
//! The backend is selected once at startup from [`StorageConfig`]; callers
//! only ever see the trait. No retry is performed here; retry policy, if
//! any, belongs to the caller. A failed upload must be treated as if nothing
//! was written.

pub mod config;
pub mod error;
mod http;
mod local;
mod url;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

pub use config::{StorageBackend, StorageConfig};
pub use error::StorageError;
pub use http::HttpObjectStore;
pub use local::LocalObjectStore;
pub use url::join_public_url;

/// Media category of an uploaded asset.
///
/// Backends may route images and videos to different endpoints or
/// directories; the distinction comes from the multipart field the byte
/// buffer arrived in, not from content sniffing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable blob storage returning a retrieval URL per stored asset.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug {
    /// Store `buffer` under the given logical folder and return the URL it
    /// can be retrieved from.
    ///
    /// On error, callers must not assume a partial write is visible.
    async fn upload(
        &self,
        buffer: Bytes,
        folder: &str,
        kind: MediaKind,
    ) -> Result<String, StorageError>;
}

/// Build the configured object store backend.
pub fn from_config(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.backend {
        StorageBackend::Remote => Ok(Arc::new(HttpObjectStore::new(
            config
                .endpoint
                .clone()
                .ok_or_else(|| StorageError::Config("STORAGE_ENDPOINT is not set".to_string()))?,
            config
                .api_key
                .clone()
                .ok_or_else(|| StorageError::Config("STORAGE_API_KEY is not set".to_string()))?,
        ))),
        StorageBackend::Local => Ok(Arc::new(LocalObjectStore::new(
            config.media_root.clone(),
            config.media_base_url.clone(),
        ))),
    }
}
