//! API routes module
//!
//! Wires the catalog and orders domains to the shared MongoDB database and
//! the configured object store.

pub mod health;

use std::sync::Arc;

use axum::Router;
use domain_catalog::{MongoProductRepository, ProductService};
use domain_orders::{MongoOrderRepository, OrderService};

use crate::state::AppState;

/// Create all API routes.
///
/// Route paths here are final: the domains publish their endpoints at the
/// server root, so the routers are merged rather than nested.
pub fn routes(state: &AppState) -> Router {
    let product_service = ProductService::new(MongoProductRepository::new(&state.db));
    let order_service = OrderService::new(MongoOrderRepository::new(&state.db));

    Router::new()
        .merge(domain_catalog::handlers::router(
            product_service,
            Arc::clone(&state.store),
        ))
        .merge(domain_orders::handlers::router(order_service))
        .merge(health::router(state.clone()))
}
