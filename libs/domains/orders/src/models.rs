use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Page size for the administrative order listing.
pub const ORDERS_PAGE_SIZE: i64 = 5;

/// One purchased line item within an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub title: String,
    pub price: f64,
    pub quantity: i64,
}

/// Order entity - one checkout submission, immutable after creation.
///
/// `payment_id` is a generated 10-character alphanumeric receipt token,
/// distinct from the database-assigned `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Database-assigned primary key (stored as _id in MongoDB)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub payment_id: String,
    pub products: Vec<OrderLine>,
    pub total_price: f64,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    /// Shop/vendor tag, optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shope: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

/// DTO for submitting a checkout.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub products: Vec<OrderLine>,
    pub total_price: f64,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[validate(length(min = 1, max = 30))]
    pub phone_number: String,
    #[serde(default)]
    pub shope: Option<String>,
}

/// Query filters for the order listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    /// Exact match on customer phone number
    pub phone_number: Option<String>,
}

/// One page of orders with the whole-set price total.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    /// Field name kept from the established wire format
    pub products: Vec<Order>,
    pub page: u64,
    pub total_pages: u64,
    pub total_orders: u64,
    pub total_order_price: f64,
}

impl Order {
    /// Build a new order from a checkout submission and a payment id.
    pub fn from_submission(payment_id: String, input: CreateOrder) -> Self {
        Self {
            id: None,
            payment_id,
            products: input.products,
            total_price: input.total_price,
            name: input.name,
            address: input.address,
            phone_number: input.phone_number,
            shope: input.shope,
            created_at: Utc::now(),
        }
    }
}
