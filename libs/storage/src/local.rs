//! Filesystem implementation of ObjectStore.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::instrument;
use uuid::Uuid;

use crate::error::StorageError;
use crate::url::join_public_url;
use crate::{MediaKind, ObjectStore};

/// Object store that writes buffers under a local media root.
///
/// Each asset lands at `{media_root}/{folder}/{uuid}` and is reported back
/// as `{media_base_url}/{folder}/{uuid}`. Names are random so concurrent
/// uploads never clobber each other.
#[derive(Debug)]
pub struct LocalObjectStore {
    media_root: PathBuf,
    media_base_url: String,
}

impl LocalObjectStore {
    pub fn new(media_root: impl Into<PathBuf>, media_base_url: impl Into<String>) -> Self {
        Self {
            media_root: media_root.into(),
            media_base_url: media_base_url.into(),
        }
    }

    fn object_name(kind: MediaKind) -> String {
        let extension = match kind {
            MediaKind::Image => "img",
            MediaKind::Video => "vid",
        };
        format!("{}.{}", Uuid::new_v4(), extension)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    #[instrument(skip(self, buffer), fields(bytes = buffer.len(), folder, kind = %kind))]
    async fn upload(
        &self,
        buffer: Bytes,
        folder: &str,
        kind: MediaKind,
    ) -> Result<String, StorageError> {
        let name = Self::object_name(kind);
        let dir = self.media_root.join(folder.trim_matches('/'));
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(&name);
        tokio::fs::write(&path, &buffer).await?;

        let url = join_public_url(&self.media_base_url, folder, &name);
        tracing::debug!(path = %path.display(), url = %url, "Asset stored locally");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("storage-test-{}-{}", tag, Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    #[tokio::test]
    async fn upload_writes_file_and_returns_url() {
        let root = temp_root("write");
        let store = LocalObjectStore::new(&root, "http://localhost:8000/media");

        let url = store
            .upload(Bytes::from_static(b"pixels"), "products/images", MediaKind::Image)
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:8000/media/products/images/"));
        assert!(url.ends_with(".img"));

        let name = url.rsplit('/').next().unwrap();
        let written = std::fs::read(root.join("products/images").join(name)).unwrap();
        assert_eq!(written, b"pixels");

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn concurrent_uploads_get_distinct_names() {
        let root = temp_root("distinct");
        let store = LocalObjectStore::new(&root, "http://localhost:8000/media");

        let (a, b) = tokio::join!(
            store.upload(Bytes::from_static(b"one"), "products/video", MediaKind::Video),
            store.upload(Bytes::from_static(b"two"), "products/video", MediaKind::Video),
        );
        assert_ne!(a.unwrap(), b.unwrap());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
