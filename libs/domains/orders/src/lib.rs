//! Orders Domain
//!
//! Checkout submission and administrative order tracking backed by MongoDB.
//! Follows the same layering as the catalog domain: handlers call a service,
//! the service drives a repository trait with a MongoDB implementation.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{CreateOrder, Order, OrderFilter, OrderLine, OrderPage, ORDERS_PAGE_SIZE};
pub use mongodb::MongoOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
