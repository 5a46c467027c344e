//! Catalog Service - Business logic layer

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use rand::Rng;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    IngestReceipt, Product, ProductFilter, ProductForm, ProductPage, UploadedMedia,
};
use crate::repository::ProductRepository;

/// Attempts at drawing an unused 8-digit productId before giving up.
const MAX_ID_ATTEMPTS: usize = 5;

/// Catalog service providing query and ingestion logic.
///
/// The service layer handles field parsing, id generation, pagination
/// arithmetic, and orchestrates repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Run a filtered, paginated catalog query with whole-set aggregates.
    ///
    /// Pages are 1-indexed; a page below 1 is coerced to 1. A page past the
    /// end yields an empty item list while counts and totals stay accurate.
    #[instrument(skip(self, filter))]
    pub async fn query(
        &self,
        filter: ProductFilter,
        page: u64,
        page_size: i64,
    ) -> CatalogResult<ProductPage> {
        let page = page.max(1);
        // Saturating: an absurd page must not overflow the skip offset
        let skip = page.saturating_sub(1).saturating_mul(page_size as u64);

        let (total_products, products, totals) = tokio::try_join!(
            self.repository.count(&filter),
            self.repository.find_page(&filter, skip, page_size),
            self.repository.totals(&filter),
        )?;

        let total_pages = total_products.div_ceil(page_size as u64);

        Ok(ProductPage {
            products,
            page,
            total_pages,
            total_products,
            total_quantity: totals.total_quantity,
            total_buying_price: totals.total_buying_price,
            total_selling_price: totals.total_selling_price,
        })
    }

    /// Assemble and persist a product from form fields and uploaded media.
    ///
    /// Numeric fields are parsed explicitly; a value that does not parse is
    /// rejected instead of being coerced.
    #[instrument(skip(self, form, media), fields(title = %form.title))]
    pub async fn ingest(
        &self,
        form: ProductForm,
        media: UploadedMedia,
    ) -> CatalogResult<IngestReceipt> {
        let buying_price = parse_f64("buyingPrice", &form.buying_price)?;
        let selling_price = parse_f64("sellingPrice", &form.selling_price)?;
        let quantity = parse_i64("quantity", &form.quantity)?;

        let product_id = self.generate_product_id().await?;
        let product = Product::assemble(
            product_id.clone(),
            form,
            buying_price,
            selling_price,
            quantity,
            media.clone(),
        );

        let id = self.repository.insert(product).await?;
        tracing::info!(%id, %product_id, "Product ingested");

        Ok(IngestReceipt {
            id,
            product_id,
            media,
        })
    }

    /// Get a product by primary key
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> CatalogResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Delete a product by primary key
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }
        Ok(())
    }

    /// Draw a random 8-digit numeric id not currently in use.
    ///
    /// The collision check closes the window the unchecked random draw left
    /// open; a concurrent insert between check and use is still possible but
    /// the id is human-facing, not a primary key.
    async fn generate_product_id(&self) -> CatalogResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = rand::rng().random_range(10_000_000..100_000_000_u64).to_string();
            if !self.repository.exists_by_product_id(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(CatalogError::IdExhausted)
    }
}

fn parse_f64(field: &'static str, value: &str) -> CatalogResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CatalogError::InvalidField {
            field,
            value: value.to_string(),
        })
}

fn parse_i64(field: &'static str, value: &str) -> CatalogResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| CatalogError::InvalidField {
            field,
            value: value.to_string(),
        })
}
