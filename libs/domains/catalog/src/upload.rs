//! Upload orchestrator: multipart parsing and concurrent media fan-out.
//!
//! An upload request carries up to three named file groups (`images` with at
//! most five files, `singleImage` and `video` with at most one each) plus the
//! scalar product fields as text parts. Files in the `images` group are
//! pushed to object storage concurrently; the result list keeps submission
//! order no matter which upload finishes first. The first failure fails the
//! whole request and cancels still-pending sibling uploads. Objects already
//! written stay in storage; no compensating delete is attempted.

use std::time::Duration;

use axum::extract::Multipart;
use bytes::Bytes;
use futures::future::try_join_all;
use storage::{MediaKind, ObjectStore};
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{ProductForm, UploadedMedia, MAX_FILE_BYTES, MAX_IMAGES};

/// Deadline for a single object storage call.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// File buffers extracted from the multipart request, grouped by field name.
#[derive(Debug, Default)]
pub struct FileGroups {
    pub images: Vec<Bytes>,
    pub single_image: Option<Bytes>,
    pub video: Option<Bytes>,
}

/// Split an incoming multipart request into scalar fields and file groups.
///
/// Unknown parts are drained and ignored. Per-file size and per-group count
/// limits are enforced here, before any storage call is made.
pub async fn parse_upload(mut multipart: Multipart) -> CatalogResult<(ProductForm, FileGroups)> {
    let mut form = ProductForm::default();
    let mut groups = FileGroups::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CatalogError::UploadParse(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "images" => {
                if groups.images.len() >= MAX_IMAGES {
                    return Err(CatalogError::TooManyFiles {
                        group: "images",
                        limit: MAX_IMAGES,
                    });
                }
                groups.images.push(read_file(field, "images").await?);
            }
            "singleImage" => {
                if groups.single_image.is_some() {
                    return Err(CatalogError::TooManyFiles {
                        group: "singleImage",
                        limit: 1,
                    });
                }
                groups.single_image = Some(read_file(field, "singleImage").await?);
            }
            "video" => {
                if groups.video.is_some() {
                    return Err(CatalogError::TooManyFiles {
                        group: "video",
                        limit: 1,
                    });
                }
                groups.video = Some(read_file(field, "video").await?);
            }
            "title" => form.title = read_text(field).await?,
            "buyingPrice" => form.buying_price = read_text(field).await?,
            "sellingPrice" => form.selling_price = read_text(field).await?,
            "quantity" => form.quantity = read_text(field).await?,
            "description" => form.description = read_text(field).await?,
            "model" => form.model = read_text(field).await?,
            "category" => form.category = read_text(field).await?,
            "company" => form.company = read_text(field).await?,
            _ => {
                // Drain so the stream can continue
                let _ = field.bytes().await;
            }
        }
    }

    Ok((form, groups))
}

async fn read_file(
    field: axum::extract::multipart::Field<'_>,
    group: &'static str,
) -> CatalogResult<Bytes> {
    let data = field
        .bytes()
        .await
        .map_err(|e| CatalogError::UploadParse(e.to_string()))?;
    if data.len() > MAX_FILE_BYTES {
        return Err(CatalogError::PayloadTooLarge {
            group,
            limit: MAX_FILE_BYTES,
        });
    }
    Ok(data)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> CatalogResult<String> {
    field
        .text()
        .await
        .map_err(|e| CatalogError::UploadParse(e.to_string()))
}

/// Fan the parsed file groups out to object storage and join the results.
///
/// The three groups upload concurrently with each other, and the files of
/// the `images` group upload concurrently among themselves. `images[i]` in
/// the result always corresponds to input file `i`.
#[instrument(skip(store, groups), fields(images = groups.images.len(), single = groups.single_image.is_some(), video = groups.video.is_some()))]
pub async fn upload_media(
    store: &dyn ObjectStore,
    groups: FileGroups,
) -> CatalogResult<UploadedMedia> {
    let images_fut = async {
        let uploads = groups.images.into_iter().enumerate().map(|(index, buffer)| {
            upload_one(store, buffer, "products/images", MediaKind::Image, "images", index)
        });
        // try_join_all keeps input order and drops pending siblings on the
        // first error
        try_join_all(uploads).await
    };

    let single_fut = async {
        match groups.single_image {
            Some(buffer) => {
                upload_one(store, buffer, "products/single", MediaKind::Image, "singleImage", 0)
                    .await
                    .map(Some)
            }
            None => Ok(None),
        }
    };

    let video_fut = async {
        match groups.video {
            Some(buffer) => {
                upload_one(store, buffer, "products/video", MediaKind::Video, "video", 0)
                    .await
                    .map(Some)
            }
            None => Ok(None),
        }
    };

    let (images, single_image, video) = tokio::try_join!(images_fut, single_fut, video_fut)?;

    Ok(UploadedMedia {
        images,
        single_image,
        video,
    })
}

async fn upload_one(
    store: &dyn ObjectStore,
    buffer: Bytes,
    folder: &str,
    kind: MediaKind,
    group: &'static str,
    index: usize,
) -> CatalogResult<String> {
    match tokio::time::timeout(UPLOAD_TIMEOUT, store.upload(buffer, folder, kind)).await {
        Ok(Ok(url)) => Ok(url),
        Ok(Err(source)) => Err(CatalogError::PartialUpload {
            group,
            index,
            source,
        }),
        Err(_) => Err(CatalogError::UploadTimeout { group, index }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;
    use std::collections::{HashMap, HashSet};
    use storage::StorageError;

    /// Test double with per-buffer latency and failure injection.
    #[derive(Debug)]
    struct StubStore {
        latency_ms: HashMap<Vec<u8>, u64>,
        failing: HashSet<Vec<u8>>,
    }

    impl StubStore {
        fn new() -> Self {
            Self {
                latency_ms: HashMap::new(),
                failing: HashSet::new(),
            }
        }

        fn with_latency(mut self, buffer: &[u8], ms: u64) -> Self {
            self.latency_ms.insert(buffer.to_vec(), ms);
            self
        }

        fn with_failure(mut self, buffer: &[u8]) -> Self {
            self.failing.insert(buffer.to_vec());
            self
        }
    }

    #[async_trait]
    impl ObjectStore for StubStore {
        async fn upload(
            &self,
            buffer: Bytes,
            folder: &str,
            _kind: MediaKind,
        ) -> Result<String, StorageError> {
            if let Some(ms) = self.latency_ms.get(buffer.as_ref()) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            if self.failing.contains(buffer.as_ref()) {
                return Err(StorageError::Rejected {
                    status: 500,
                    message: "injected".to_string(),
                });
            }
            let name = String::from_utf8_lossy(&buffer).to_string();
            Ok(format!("https://cdn.test/{}/{}", folder, name))
        }
    }

    #[tokio::test]
    async fn image_results_keep_submission_order() {
        // C finishes first, A last; the output must still be [A, B, C]
        let store = StubStore::new()
            .with_latency(b"a", 60)
            .with_latency(b"b", 30)
            .with_latency(b"c", 5);
        let groups = FileGroups {
            images: vec![
                Bytes::from_static(b"a"),
                Bytes::from_static(b"b"),
                Bytes::from_static(b"c"),
            ],
            single_image: None,
            video: None,
        };

        let media = upload_media(&store, groups).await.unwrap();
        assert_eq!(
            media.images,
            vec![
                "https://cdn.test/products/images/a",
                "https://cdn.test/products/images/b",
                "https://cdn.test/products/images/c",
            ]
        );
        assert_eq!(media.single_image, None);
        assert_eq!(media.video, None);
    }

    #[tokio::test]
    async fn failing_image_reports_its_index() {
        let store = StubStore::new().with_failure(b"b");
        let groups = FileGroups {
            images: vec![
                Bytes::from_static(b"a"),
                Bytes::from_static(b"b"),
                Bytes::from_static(b"c"),
            ],
            single_image: None,
            video: None,
        };

        let err = upload_media(&store, groups).await.unwrap_err();
        match err {
            CatalogError::PartialUpload { group, index, .. } => {
                assert_eq!(group, "images");
                assert_eq!(index, 1);
            }
            other => panic!("expected PartialUpload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn all_three_groups_upload_to_their_folders() {
        let store = StubStore::new();
        let groups = FileGroups {
            images: vec![Bytes::from_static(b"img")],
            single_image: Some(Bytes::from_static(b"hero")),
            video: Some(Bytes::from_static(b"clip")),
        };

        let media = upload_media(&store, groups).await.unwrap();
        assert_eq!(media.images, vec!["https://cdn.test/products/images/img"]);
        assert_eq!(
            media.single_image.as_deref(),
            Some("https://cdn.test/products/single/hero")
        );
        assert_eq!(
            media.video.as_deref(),
            Some("https://cdn.test/products/video/clip")
        );
    }

    #[tokio::test]
    async fn absent_optional_groups_stay_null() {
        let store = StubStore::new();
        let media = upload_media(&store, FileGroups::default()).await.unwrap();
        assert_eq!(media, UploadedMedia::default());
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        let boundary = "test-boundary";
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match filename {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        Request::builder()
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn parse_splits_text_and_file_parts() {
        let request = multipart_request(&[
            ("title", None, b"Widget"),
            ("buyingPrice", None, b"10.50"),
            ("quantity", None, b"3"),
            ("images", Some("a.png"), b"AAA"),
            ("images", Some("b.png"), b"BBB"),
            ("singleImage", Some("hero.png"), b"HERO"),
            ("ignored", None, b"whatever"),
        ]);
        let multipart = Multipart::from_request(request, &()).await.unwrap();

        let (form, groups) = parse_upload(multipart).await.unwrap();
        assert_eq!(form.title, "Widget");
        assert_eq!(form.buying_price, "10.50");
        assert_eq!(form.quantity, "3");
        assert_eq!(groups.images.len(), 2);
        assert_eq!(groups.images[0].as_ref(), b"AAA");
        assert!(groups.single_image.is_some());
        assert!(groups.video.is_none());
    }

    #[tokio::test]
    async fn parse_rejects_sixth_image() {
        let parts: Vec<(&str, Option<&str>, &[u8])> = (0..6)
            .map(|_| ("images", Some("x.png"), b"X" as &[u8]))
            .collect();
        let request = multipart_request(&parts);
        let multipart = Multipart::from_request(request, &()).await.unwrap();

        let err = parse_upload(multipart).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::TooManyFiles { group: "images", .. }
        ));
    }

    #[tokio::test]
    async fn parse_rejects_oversized_file() {
        let oversized = vec![0_u8; MAX_FILE_BYTES + 1];
        let request = multipart_request(&[("video", Some("big.mp4"), oversized.as_slice())]);
        // Apply the same body-limit layer the upload route uses so the
        // extractor's default 2 MB cap doesn't trip before the per-file check.
        let svc = tower::Layer::layer(
            &axum::extract::DefaultBodyLimit::max(crate::handlers::MAX_BODY_BYTES),
            tower::service_fn(|req: Request<Body>| async move {
                Ok::<_, std::convert::Infallible>(req)
            }),
        );
        let request = tower::ServiceExt::oneshot(svc, request).await.unwrap();
        let multipart = Multipart::from_request(request, &()).await.unwrap();

        let err = parse_upload(multipart).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::PayloadTooLarge { group: "video", .. }
        ));
    }
}
