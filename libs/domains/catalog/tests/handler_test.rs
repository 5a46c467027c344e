//! Handler tests for the catalog domain
//!
//! These tests exercise the HTTP surface against real MongoDB (via
//! testcontainers) and a local-disk object store:
//! - Multipart ingestion end to end
//! - Field validation status codes
//! - Listing responses with aggregates
//! - Error responses for malformed and unknown ids

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "test-boundary";

// Helper to parse JSON response body
async fn json_body(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn test_router(test_name: &str, mongo: &TestMongo) -> axum::Router {
    let builder = TestDataBuilder::from_test_name(test_name);
    let media_root = std::env::temp_dir().join(builder.name("catalog-handler", "media"));

    let db = mongo.database("catalog-handler-test");
    let repo = MongoProductRepository::new(&db);
    let service = ProductService::new(repo);
    let store: Arc<dyn storage::ObjectStore> = Arc::new(storage::LocalObjectStore::new(
        media_root,
        "http://localhost:8000/media",
    ));

    handlers::router(service, store)
}

fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
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
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload-products")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn valid_upload_parts<'a>() -> Vec<(&'a str, Option<&'a str>, &'a [u8])> {
    vec![
        ("title", None, b"Handler Widget".as_slice()),
        ("buyingPrice", None, b"10.50"),
        ("sellingPrice", None, b"15.00"),
        ("quantity", None, b"3"),
        ("description", None, b"Uploaded in a handler test"),
        ("model", None, b"X1"),
        ("category", None, b"tools"),
        ("company", None, b"Acme"),
        ("images", Some("a.png"), b"AAA"),
        ("images", Some("b.png"), b"BBB"),
        ("singleImage", Some("hero.png"), b"HERO"),
    ]
}

#[tokio::test]
async fn upload_product_end_to_end() {
    let mongo = TestMongo::new().await;
    let app = test_router("upload_end_to_end", &mongo).await;

    let response = app.oneshot(upload_request(&valid_upload_parts())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response.into_body()).await;
    assert_eq!(json["message"], "Product added successfully!");

    let product_id = json["productId"].as_str().unwrap();
    assert_eq!(product_id.len(), 8);
    assert!(product_id.chars().all(|c| c.is_ascii_digit()));

    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    for url in files {
        assert!(url.as_str().unwrap().starts_with("http://localhost:8000/media/"));
    }
    assert!(json["singleImage"].as_str().is_some());
    assert!(json["video"].is_null());
}

#[tokio::test]
async fn upload_rejects_non_numeric_quantity() {
    let mongo = TestMongo::new().await;
    let app = test_router("upload_bad_quantity", &mongo).await;

    let mut parts = valid_upload_parts();
    for part in parts.iter_mut() {
        if part.0 == "quantity" {
            part.2 = b"three";
        }
    }

    let response = app.oneshot(upload_request(&parts)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("quantity"));
}

#[tokio::test]
async fn admin_listing_returns_page_with_aggregates() {
    let mongo = TestMongo::new().await;
    let app = test_router("admin_listing", &mongo).await;

    let response = app
        .clone()
        .oneshot(upload_request(&valid_upload_parts()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response.into_body()).await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["totalProducts"], 1);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["totalQuantity"], 3);
    assert_eq!(json["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn listing_past_the_end_keeps_totals_accurate() {
    let mongo = TestMongo::new().await;
    let app = test_router("past_the_end", &mongo).await;

    let response = app
        .clone()
        .oneshot(upload_request(&valid_upload_parts()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/products?page=99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response.into_body()).await;
    assert_eq!(json["page"], 99);
    assert!(json["products"].as_array().unwrap().is_empty());
    assert_eq!(json["totalProducts"], 1);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["totalQuantity"], 3);

    // A page value that does not parse means page 1, not a rejection
    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/products?page=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response.into_body()).await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_unknown_product_is_404() {
    let mongo = TestMongo::new().await;
    let app = test_router("delete_unknown", &mongo).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/deleteProduct/ffffffffffffffffffffffff")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_object_id_is_400() {
    let mongo = TestMongo::new().await;
    let app = test_router("malformed_id", &mongo).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products/details/not-an-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
