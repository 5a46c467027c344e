//! Catalog Domain
//!
//! This module provides a complete domain implementation for catalog queries
//! and media-backed product ingestion using MongoDB and pluggable object
//! storage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (upload, admin/visitor listing, details, delete)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Upload    │  ← Multipart parsing, concurrent fan-out to object storage
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, field parsing, id generation, query math
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers,
//!     mongodb::MongoProductRepository,
//!     service::ProductService,
//! };
//! use mongodb::Client;
//! use storage::{StorageConfig, from_config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository);
//! let store = from_config(&StorageConfig::default())?;
//!
//! let router = handlers::router(service, store);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod upload;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    IngestReceipt, Product, ProductFilter, ProductForm, ProductPage, ProductTotals, UploadedMedia,
    ADMIN_PAGE_SIZE, VISITOR_PAGE_SIZE,
};
pub use mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
