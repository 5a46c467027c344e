//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    Collection, Database,
};
use tracing::instrument;

use crate::error::OrderResult;
use crate::models::{Order, OrderFilter};
use crate::repository::OrderRepository;

/// MongoDB implementation of the OrderRepository
pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    /// Create a new MongoOrderRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Order>("orders");
        Self { collection }
    }

    /// Create a new MongoOrderRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Order>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Order> {
        &self.collection
    }

    fn build_filter(filter: &OrderFilter) -> Document {
        let mut doc = doc! {};
        if let Some(phone) = filter.phone_number.as_deref().filter(|s| !s.is_empty()) {
            doc.insert("phoneNumber", phone);
        }
        doc
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(payment_id = %order.payment_id))]
    async fn insert(&self, order: Order) -> OrderResult<ObjectId> {
        let result = self.collection.insert_one(order).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .unwrap_or_else(ObjectId::new);
        Ok(id)
    }

    #[instrument(skip(self, filter))]
    async fn find_page(
        &self,
        filter: &OrderFilter,
        skip: u64,
        limit: i64,
    ) -> OrderResult<Vec<Order>> {
        let query = Self::build_filter(filter);
        let orders = self
            .collection
            .find(query)
            .sort(doc! { "_id": -1 })
            .skip(skip)
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &OrderFilter) -> OrderResult<u64> {
        let query = Self::build_filter(filter);
        Ok(self.collection.count_documents(query).await?)
    }

    #[instrument(skip(self, filter))]
    async fn total_price(&self, filter: &OrderFilter) -> OrderResult<f64> {
        let query = Self::build_filter(filter);
        let pipeline = vec![
            doc! { "$match": query },
            doc! { "$group": {
                "_id": null,
                "totalOrderPrice": { "$sum": "$totalPrice" },
            }},
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let Some(totals) = cursor.try_next().await? else {
            return Ok(0.0);
        };

        Ok(match totals.get("totalOrderPrice") {
            Some(Bson::Double(v)) => *v,
            Some(Bson::Int32(v)) => f64::from(*v),
            Some(Bson::Int64(v)) => *v as f64,
            _ => 0.0,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> OrderResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_matches_everything() {
        let doc = MongoOrderRepository::build_filter(&OrderFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn phone_filter_is_exact_match() {
        let filter = OrderFilter {
            phone_number: Some("0123456789".to_string()),
        };
        let doc = MongoOrderRepository::build_filter(&filter);
        assert_eq!(doc.get_str("phoneNumber").unwrap(), "0123456789");
    }

    #[test]
    fn empty_phone_is_skipped() {
        let filter = OrderFilter {
            phone_number: Some(String::new()),
        };
        let doc = MongoOrderRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }
}
