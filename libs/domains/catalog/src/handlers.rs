//! HTTP handlers for the catalog API

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadGatewayResponse, BadRequestObjectIdResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
    },
    ObjectIdPath,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use storage::ObjectStore;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::CatalogResult;
use crate::models::{
    Product, ProductFilter, ProductPage, ADMIN_PAGE_SIZE, MAX_FILE_BYTES, VISITOR_PAGE_SIZE,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::upload::{parse_upload, upload_media};

/// Request body cap: all seven possible files at the per-file limit plus
/// headroom for the scalar fields.
pub(crate) const MAX_BODY_BYTES: usize = 7 * MAX_FILE_BYTES + 1024 * 1024;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        upload_product,
        admin_products,
        visitor_products,
        product_details,
        delete_product,
    ),
    components(
        schemas(Product, ProductPage, UploadResponse, DeleteResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            PayloadTooLargeResponse,
            BadGatewayResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Catalog query and product ingestion endpoints")
    )
)]
pub struct ApiDoc;

/// Shared state for the catalog routes.
pub struct CatalogState<R: ProductRepository> {
    service: Arc<ProductService<R>>,
    store: Arc<dyn ObjectStore>,
}

impl<R: ProductRepository> Clone for CatalogState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            store: Arc::clone(&self.store),
        }
    }
}

/// Create the catalog router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    store: Arc<dyn ObjectStore>,
) -> Router {
    let state = CatalogState {
        service: Arc::new(service),
        store,
    };

    Router::new()
        .route(
            "/upload-products",
            post(upload_product).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .route("/admin/products", get(admin_products))
        .route("/visitor/products", get(visitor_products))
        .route("/products/details/{id}", get(product_details))
        .route("/deleteProduct/{id}", delete(delete_product))
        .with_state(state)
}

/// Listing query parameters: page plus the recognized filters.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    /// 1-indexed page; absent or unparseable values mean page 1
    #[serde(default = "first_page", deserialize_with = "lenient_page")]
    #[param(value_type = u64)]
    pub page: u64,
    pub title: Option<String>,
    pub product_id: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            title: None,
            product_id: None,
            category: None,
            company: None,
        }
    }
}

impl CatalogQuery {
    fn split(self) -> (u64, ProductFilter) {
        (
            self.page,
            ProductFilter {
                title: self.title,
                product_id: self.product_id,
                category: self.category,
                company: self.company,
            },
        )
    }
}

pub(crate) fn first_page() -> u64 {
    1
}

/// Query strings arrive as text; anything that does not parse as a page
/// number (`?page=abc`, `?page=-1`) falls back to page 1 instead of
/// rejecting the request.
pub(crate) fn lenient_page<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or(1))
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Database-assigned primary key of the new product
    pub id: String,
    /// Generated 8-digit numeric product identifier
    pub product_id: String,
    pub files: Vec<String>,
    pub single_image: Option<String>,
    pub video: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}

/// Ingest a product with its media files
#[utoipa::path(
    post,
    path = "/upload-products",
    tag = "Catalog",
    request_body(content_type = "multipart/form-data", description = "File groups `images` (up to 5), `singleImage`, `video` plus scalar product fields"),
    responses(
        (status = 200, description = "Product added successfully", body = UploadResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 502, response = BadGatewayResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_product<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    multipart: Multipart,
) -> CatalogResult<Json<UploadResponse>> {
    let (form, groups) = parse_upload(multipart).await?;
    let media = upload_media(state.store.as_ref(), groups).await?;
    let receipt = state.service.ingest(form, media).await?;

    Ok(Json(UploadResponse {
        message: "Product added successfully!".to_string(),
        id: receipt.id.to_hex(),
        product_id: receipt.product_id,
        files: receipt.media.images,
        single_image: receipt.media.single_image,
        video: receipt.media.video,
    }))
}

/// Paginated administrative catalog listing (page size 5)
#[utoipa::path(
    get,
    path = "/admin/products",
    tag = "Catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "One page of products with aggregates", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_products<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    Query(query): Query<CatalogQuery>,
) -> CatalogResult<Json<ProductPage>> {
    let (page, filter) = query.split();
    let result = state.service.query(filter, page, ADMIN_PAGE_SIZE).await?;
    Ok(Json(result))
}

/// Paginated public catalog listing (page size 12)
#[utoipa::path(
    get,
    path = "/visitor/products",
    tag = "Catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "One page of products with aggregates", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn visitor_products<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    Query(query): Query<CatalogQuery>,
) -> CatalogResult<Json<ProductPage>> {
    let (page, filter) = query.split();
    let result = state.service.query(filter, page, VISITOR_PAGE_SIZE).await?;
    Ok(Json(result))
}

/// Fetch a single product by primary key
#[utoipa::path(
    get,
    path = "/products/details/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Product primary key")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn product_details<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CatalogResult<Json<Product>> {
    let product = state.service.get_product(id).await?;
    Ok(Json(product))
}

/// Remove a product by primary key
#[utoipa::path(
    delete,
    path = "/deleteProduct/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Product primary key")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CatalogResult<Json<DeleteResponse>> {
    state.service.delete_product(id).await?;
    Ok(Json(DeleteResponse {
        message: "Product deleted successfully".to_string(),
        deleted_count: 1,
    }))
}
