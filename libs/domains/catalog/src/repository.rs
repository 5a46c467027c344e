use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter, ProductTotals};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for the catalog.
/// Implementations can use different storage backends (MongoDB, in-memory, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return the assigned primary key
    async fn insert(&self, product: Product) -> CatalogResult<ObjectId>;

    /// Fetch one page of products matching the filter, most recent first
    async fn find_page(
        &self,
        filter: &ProductFilter,
        skip: u64,
        limit: i64,
    ) -> CatalogResult<Vec<Product>>;

    /// Count all products matching the filter
    async fn count(&self, filter: &ProductFilter) -> CatalogResult<u64>;

    /// Aggregate sums over all products matching the filter
    async fn totals(&self, filter: &ProductFilter) -> CatalogResult<ProductTotals>;

    /// Get a product by primary key
    async fn find_by_id(&self, id: ObjectId) -> CatalogResult<Option<Product>>;

    /// Delete a product by primary key; returns whether a document was removed
    async fn delete(&self, id: ObjectId) -> CatalogResult<bool>;

    /// Check whether a human-facing productId is already taken
    async fn exists_by_product_id(&self, product_id: &str) -> CatalogResult<bool>;
}
