//! Handler tests for the orders domain
//!
//! These tests verify the HTTP surface against real MongoDB:
//! - Checkout submission returns a generated payment id
//! - Validation failures surface as 400 responses
//! - The admin listing carries the whole-set price total

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_orders::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestMongo;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_router(mongo: &TestMongo) -> axum::Router {
    let db = mongo.database("orders-handler-test");
    let repo = MongoOrderRepository::new(&db);
    handlers::router(OrderService::new(repo))
}

fn checkout_payload(phone: &str) -> serde_json::Value {
    json!({
        "products": [
            { "title": "Widget", "price": 15.0, "quantity": 2 }
        ],
        "totalPrice": 30.0,
        "name": "Jo",
        "address": "1 Main St",
        "phoneNumber": phone
    })
}

fn post_json(uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn save_payment_returns_generated_payment_id() {
    let mongo = TestMongo::new().await;
    let app = test_router(&mongo);

    let response = app
        .oneshot(post_json("/save-payment", &checkout_payload("0123456789")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response.into_body()).await;
    assert_eq!(json["message"], "Payment details saved successfully");

    let payment_id = json["paymentId"].as_str().unwrap();
    assert_eq!(payment_id.len(), 10);
    assert!(payment_id.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn save_payment_rejects_blank_name() {
    let mongo = TestMongo::new().await;
    let app = test_router(&mongo);

    let mut payload = checkout_payload("0123456789");
    payload["name"] = json!("");

    let response = app
        .oneshot(post_json("/save-payment", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_listing_filters_by_phone_and_totals_prices() {
    let mongo = TestMongo::new().await;
    let app = test_router(&mongo);

    for phone in ["0123456789", "0123456789", "0700000000"] {
        let response = app
            .clone()
            .oneshot(post_json("/save-payment", &checkout_payload(phone)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/orders?phoneNumber=0123456789")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response.into_body()).await;
    assert_eq!(json["totalOrders"], 2);
    assert_eq!(json["totalOrderPrice"], 60.0);
    assert_eq!(json["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_unknown_order_is_404() {
    let mongo = TestMongo::new().await;
    let app = test_router(&mongo);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/deleteOrders/ffffffffffffffffffffffff")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
