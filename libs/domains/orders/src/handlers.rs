//! HTTP handlers for the orders API

use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    ObjectIdPath, ValidatedJson,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::OrderResult;
use crate::models::{CreateOrder, Order, OrderFilter, OrderLine, OrderPage};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the orders API
#[derive(OpenApi)]
#[openapi(
    paths(save_payment, admin_orders, delete_order),
    components(
        schemas(Order, OrderLine, CreateOrder, OrderPage, SavePaymentResponse, DeleteResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Checkout and order tracking endpoints")
    )
)]
pub struct ApiDoc;

/// Create the orders router with all HTTP endpoints
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/save-payment", post(save_payment))
        .route("/admin/orders", get(admin_orders))
        .route("/deleteOrders/{id}", delete(delete_order))
        .with_state(shared_service)
}

/// Listing query parameters: page plus the phone number filter.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    /// 1-indexed page; absent or unparseable values mean page 1
    #[serde(default = "first_page", deserialize_with = "lenient_page")]
    #[param(value_type = u64)]
    pub page: u64,
    pub phone_number: Option<String>,
}

impl Default for OrdersQuery {
    fn default() -> Self {
        Self {
            page: 1,
            phone_number: None,
        }
    }
}

fn first_page() -> u64 {
    1
}

/// Query strings arrive as text; anything that does not parse as a page
/// number (`?page=abc`, `?page=-1`) falls back to page 1 instead of
/// rejecting the request.
fn lenient_page<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or(1))
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavePaymentResponse {
    pub message: String,
    pub payment_id: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}

/// Persist a checkout submission
#[utoipa::path(
    post,
    path = "/save-payment",
    tag = "Orders",
    request_body = CreateOrder,
    responses(
        (status = 200, description = "Payment details saved", body = SavePaymentResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn save_payment<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<Json<SavePaymentResponse>> {
    let payment_id = service.save(input).await?;
    Ok(Json(SavePaymentResponse {
        message: "Payment details saved successfully".to_string(),
        payment_id,
    }))
}

/// Paginated administrative order listing (page size 5)
#[utoipa::path(
    get,
    path = "/admin/orders",
    tag = "Orders",
    params(OrdersQuery),
    responses(
        (status = 200, description = "One page of orders with the price total", body = OrderPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    Query(query): Query<OrdersQuery>,
) -> OrderResult<Json<OrderPage>> {
    let filter = OrderFilter {
        phone_number: query.phone_number,
    };
    let result = service.query(filter, query.page).await?;
    Ok(Json(result))
}

/// Remove an order by primary key
#[utoipa::path(
    delete,
    path = "/deleteOrders/{id}",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order primary key")
    ),
    responses(
        (status = 200, description = "Order deleted", body = DeleteResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> OrderResult<Json<DeleteResponse>> {
    service.delete_order(id).await?;
    Ok(Json(DeleteResponse {
        message: "Order deleted successfully".to_string(),
        deleted_count: 1,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    fn parse_query(uri: &str) -> OrdersQuery {
        let uri: Uri = uri.parse().unwrap();
        let Query(query) = Query::<OrdersQuery>::try_from_uri(&uri).unwrap();
        query
    }

    #[test]
    fn absent_page_defaults_to_first() {
        let query = parse_query("/admin/orders?phoneNumber=0123456789");
        assert_eq!(query.page, 1);
        assert_eq!(query.phone_number.as_deref(), Some("0123456789"));
    }

    #[test]
    fn unparseable_page_falls_back_to_first() {
        assert_eq!(parse_query("/admin/orders?page=abc").page, 1);
        assert_eq!(parse_query("/admin/orders?page=-1").page, 1);
    }
}
