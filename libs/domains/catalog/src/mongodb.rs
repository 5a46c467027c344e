//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::CatalogResult;
use crate::models::{Product, ProductFilter, ProductTotals};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the listing filters
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "productId": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_product_id".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "company": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_company".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Build a MongoDB filter document from ProductFilter.
    ///
    /// Empty-string values are treated as absent. All supplied filters are
    /// ANDed; an empty filter matches the whole collection.
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(title) = non_empty(&filter.title) {
            doc.insert("title", doc! { "$regex": title, "$options": "i" });
        }

        if let Some(product_id) = non_empty(&filter.product_id) {
            doc.insert("productId", product_id);
        }

        if let Some(category) = non_empty(&filter.category) {
            doc.insert("category", category);
        }

        if let Some(company) = non_empty(&filter.company) {
            doc.insert("company", company);
        }

        doc
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Read a numeric field that the aggregation may return as any BSON number.
fn numeric_f64(doc: &Document, key: &str) -> f64 {
    match doc.get(key) {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        Some(Bson::Int64(v)) => *v as f64,
        _ => 0.0,
    }
}

fn numeric_i64(doc: &Document, key: &str) -> i64 {
    match doc.get(key) {
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.product_id))]
    async fn insert(&self, product: Product) -> CatalogResult<ObjectId> {
        let result = self.collection.insert_one(product).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .unwrap_or_else(ObjectId::new);
        Ok(id)
    }

    #[instrument(skip(self, filter))]
    async fn find_page(
        &self,
        filter: &ProductFilter,
        skip: u64,
        limit: i64,
    ) -> CatalogResult<Vec<Product>> {
        let query = Self::build_filter(filter);
        let products = self
            .collection
            .find(query)
            .sort(doc! { "_id": -1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(products)
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &ProductFilter) -> CatalogResult<u64> {
        let query = Self::build_filter(filter);
        Ok(self.collection.count_documents(query).await?)
    }

    #[instrument(skip(self, filter))]
    async fn totals(&self, filter: &ProductFilter) -> CatalogResult<ProductTotals> {
        let query = Self::build_filter(filter);
        let pipeline = vec![
            doc! { "$match": query },
            doc! { "$group": {
                "_id": null,
                "totalQuantity": { "$sum": "$quantity" },
                "totalBuyingPrice": { "$sum": "$buyingPrice" },
                "totalSellingPrice": { "$sum": "$sellingPrice" },
            }},
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        // An empty filtered set produces no group document; default to zero
        let Some(totals) = cursor.try_next().await? else {
            return Ok(ProductTotals::default());
        };

        Ok(ProductTotals {
            total_quantity: numeric_i64(&totals, "totalQuantity"),
            total_buying_price: numeric_f64(&totals, "totalBuyingPrice"),
            total_selling_price: numeric_f64(&totals, "totalSellingPrice"),
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> CatalogResult<Option<Product>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CatalogResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists_by_product_id(&self, product_id: &str) -> CatalogResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "productId": product_id })
            .await?;
        Ok(count > 0)
    }
}
