//! HTTP implementation of ObjectStore for a remote media service.

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use tracing::instrument;

use crate::error::StorageError;
use crate::{MediaKind, ObjectStore};

/// Object store backed by a remote media service.
///
/// Uploads go as `POST {endpoint}/{kind}/upload` multipart requests with a
/// bearer API key; the service answers `{"secure_url": "..."}` for stored
/// assets. The logical folder travels as a form field so the service can
/// namespace assets the same way the local backend does with directories.
#[derive(Debug)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Deserialize)]
struct UploadReply {
    secure_url: String,
}

impl HttpObjectStore {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn upload_url(&self, kind: MediaKind) -> String {
        format!("{}/{}/upload", self.endpoint.trim_end_matches('/'), kind)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    #[instrument(skip(self, buffer), fields(bytes = buffer.len(), folder, kind = %kind))]
    async fn upload(
        &self,
        buffer: Bytes,
        folder: &str,
        kind: MediaKind,
    ) -> Result<String, StorageError> {
        let part = reqwest::multipart::Part::bytes(buffer.to_vec()).file_name("asset");
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let response = self
            .client
            .post(self.upload_url(kind))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Media service rejected upload");
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let reply: UploadReply = response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;

        tracing::debug!(url = %reply.secure_url, "Asset stored remotely");
        Ok(reply.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url_per_kind() {
        let store = HttpObjectStore::new("https://media.example.com/", "key");
        assert_eq!(
            store.upload_url(MediaKind::Image),
            "https://media.example.com/image/upload"
        );
        assert_eq!(
            store.upload_url(MediaKind::Video),
            "https://media.example.com/video/upload"
        );
    }

    #[tokio::test]
    async fn upload_returns_secure_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/image/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"secure_url":"https://cdn.example.com/products/images/a.jpg"}"#)
            .create_async()
            .await;

        let store = HttpObjectStore::new(server.url(), "key");
        let url = store
            .upload(Bytes::from_static(b"pixels"), "products/images", MediaKind::Image)
            .await
            .unwrap();

        assert_eq!(url, "https://cdn.example.com/products/images/a.jpg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upload_rejection_carries_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/video/upload")
            .with_status(413)
            .with_body("too large")
            .create_async()
            .await;

        let store = HttpObjectStore::new(server.url(), "key");
        let err = store
            .upload(Bytes::from_static(b"frames"), "products/video", MediaKind::Video)
            .await
            .unwrap_err();

        match err {
            StorageError::Rejected { status, message } => {
                assert_eq!(status, 413);
                assert_eq!(message, "too large");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upload_garbage_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/image/upload")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let store = HttpObjectStore::new(server.url(), "key");
        let err = store
            .upload(Bytes::from_static(b"pixels"), "products/images", MediaKind::Image)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::InvalidResponse(_)));
    }
}
