use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Page size for administrative catalog views.
pub const ADMIN_PAGE_SIZE: i64 = 5;

/// Page size for public/visitor catalog views.
pub const VISITOR_PAGE_SIZE: i64 = 12;

/// Per-file upload cap in bytes.
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum number of files accepted in the `images` group.
pub const MAX_IMAGES: usize = 5;

/// Product entity - represents a product stored in MongoDB.
///
/// `product_id` is a human-facing 8-digit numeric string generated at
/// ingestion time; it is distinct from the database-assigned `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Database-assigned primary key (stored as _id in MongoDB)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    /// Human-facing 8-digit numeric identifier
    pub product_id: String,
    pub title: String,
    /// Purchase price in currency units
    pub buying_price: f64,
    /// Sale price in currency units
    pub selling_price: f64,
    /// Unit count in stock
    pub quantity: i64,
    pub description: String,
    pub category: String,
    pub company: String,
    pub model: String,
    /// Ordered media URLs, at most [`MAX_IMAGES`]
    pub images: Vec<String>,
    pub single_image: Option<String>,
    pub video: Option<String>,
    /// Creation timestamp
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

/// Raw scalar fields collected from the multipart form.
///
/// Numeric fields arrive as text and are parsed explicitly by the service;
/// a non-numeric value is rejected rather than silently coerced.
#[derive(Debug, Clone, Default, ToSchema)]
pub struct ProductForm {
    pub title: String,
    pub buying_price: String,
    pub selling_price: String,
    pub quantity: String,
    pub description: String,
    pub model: String,
    pub category: String,
    pub company: String,
}

/// URLs produced by a fully successful media upload.
///
/// `images[i]` corresponds to the i-th submitted file, regardless of
/// upload completion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    pub images: Vec<String>,
    pub single_image: Option<String>,
    pub video: Option<String>,
}

/// Receipt returned after a successful ingestion.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestReceipt {
    /// Database-assigned primary key of the new product
    #[schema(value_type = String)]
    pub id: ObjectId,
    /// Generated 8-digit numeric product identifier
    pub product_id: String,
    pub media: UploadedMedia,
}

/// Query filters for catalog listings.
///
/// Absent or empty filters are omitted from the predicate; supplying none
/// matches the entire collection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Case-insensitive substring match on title
    pub title: Option<String>,
    /// Exact match on the 8-digit product identifier
    pub product_id: Option<String>,
    /// Exact match on category
    pub category: Option<String>,
    /// Exact match on company
    pub company: Option<String>,
}

impl ProductFilter {
    /// True when no effective filter is set (empty strings count as absent).
    pub fn is_empty(&self) -> bool {
        fn absent(v: &Option<String>) -> bool {
            v.as_deref().is_none_or(|s| s.is_empty())
        }
        absent(&self.title)
            && absent(&self.product_id)
            && absent(&self.category)
            && absent(&self.company)
    }
}

/// Aggregate sums over a filtered product set, independent of pagination.
///
/// An empty filtered set yields all-zero totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductTotals {
    pub total_quantity: i64,
    pub total_buying_price: f64,
    pub total_selling_price: f64,
}

/// One page of catalog results with whole-set aggregates.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: u64,
    pub total_pages: u64,
    pub total_products: u64,
    pub total_quantity: i64,
    pub total_buying_price: f64,
    pub total_selling_price: f64,
}

impl Product {
    /// Assemble a product from parsed fields and uploaded media.
    pub fn assemble(
        product_id: String,
        form: ProductForm,
        buying_price: f64,
        selling_price: f64,
        quantity: i64,
        media: UploadedMedia,
    ) -> Self {
        Self {
            id: None,
            product_id,
            title: form.title,
            buying_price,
            selling_price,
            quantity,
            description: form.description,
            category: form.category,
            company: form.company,
            model: form.model,
            images: media.images,
            single_image: media.single_image,
            video: media.video,
            created_at: Utc::now(),
        }
    }
}
