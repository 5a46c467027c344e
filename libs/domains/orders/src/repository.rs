use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::OrderResult;
use crate::models::{Order, OrderFilter};

/// Repository trait for Order persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order and return the assigned primary key
    async fn insert(&self, order: Order) -> OrderResult<ObjectId>;

    /// Fetch one page of orders matching the filter, most recent first
    async fn find_page(
        &self,
        filter: &OrderFilter,
        skip: u64,
        limit: i64,
    ) -> OrderResult<Vec<Order>>;

    /// Count all orders matching the filter
    async fn count(&self, filter: &OrderFilter) -> OrderResult<u64>;

    /// Sum of `totalPrice` over all orders matching the filter
    async fn total_price(&self, filter: &OrderFilter) -> OrderResult<f64>;

    /// Delete an order by primary key; returns whether a document was removed
    async fn delete(&self, id: ObjectId) -> OrderResult<bool>;
}
