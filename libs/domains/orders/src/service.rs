//! Order Service - Business logic layer

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use rand::Rng;
use tracing::instrument;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderFilter, OrderPage, ORDERS_PAGE_SIZE};
use crate::repository::OrderRepository;

const PAYMENT_ID_LEN: usize = 10;
const PAYMENT_ID_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Order service providing checkout persistence and listing logic.
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    /// Create a new OrderService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Persist a checkout submission and return the generated payment id.
    ///
    /// The payment id is a receipt token, not a key; collisions are not
    /// checked.
    #[instrument(skip(self, input), fields(customer = %input.name))]
    pub async fn save(&self, input: CreateOrder) -> OrderResult<String> {
        let payment_id = generate_payment_id();
        let order = Order::from_submission(payment_id.clone(), input);
        let id = self.repository.insert(order).await?;
        tracing::info!(%id, %payment_id, "Order saved");
        Ok(payment_id)
    }

    /// Run a filtered, paginated order query with the whole-set price total.
    #[instrument(skip(self, filter))]
    pub async fn query(&self, filter: OrderFilter, page: u64) -> OrderResult<OrderPage> {
        let page = page.max(1);
        // Saturating: an absurd page must not overflow the skip offset
        let skip = page.saturating_sub(1).saturating_mul(ORDERS_PAGE_SIZE as u64);

        let (total_orders, orders, total_order_price) = tokio::try_join!(
            self.repository.count(&filter),
            self.repository.find_page(&filter, skip, ORDERS_PAGE_SIZE),
            self.repository.total_price(&filter),
        )?;

        Ok(OrderPage {
            products: orders,
            page,
            total_pages: total_orders.div_ceil(ORDERS_PAGE_SIZE as u64),
            total_orders,
            total_order_price,
        })
    }

    /// Delete an order by primary key
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: ObjectId) -> OrderResult<()> {
        if !self.repository.delete(id).await? {
            return Err(OrderError::NotFound(id));
        }
        Ok(())
    }
}

fn generate_payment_id() -> String {
    let mut rng = rand::rng();
    (0..PAYMENT_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..PAYMENT_ID_CHARSET.len());
            PAYMENT_ID_CHARSET[idx] as char
        })
        .collect()
}
