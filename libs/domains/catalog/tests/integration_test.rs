//! Integration tests for the catalog domain
//!
//! These tests use real MongoDB via testcontainers to ensure:
//! - Filter documents translate to the expected matches
//! - Pagination returns the most recent documents first
//! - Whole-set aggregates ignore pagination
//! - Deletes report whether a document was removed

use domain_catalog::*;
use ::mongodb::bson::oid::ObjectId;
use test_utils::{assertions::assert_some, TestDataBuilder, TestMongo};

fn sample_product(product_id: &str, title: &str, category: &str, quantity: i64) -> Product {
    Product::assemble(
        product_id.to_string(),
        ProductForm {
            title: title.to_string(),
            category: category.to_string(),
            company: "Acme".to_string(),
            model: "X1".to_string(),
            description: "Integration test product".to_string(),
            ..ProductForm::default()
        },
        10.0,
        15.0,
        quantity,
        UploadedMedia::default(),
    )
}

#[tokio::test]
async fn insert_and_fetch_product() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog-test");
    let repo = MongoProductRepository::new(&db);
    let builder = TestDataBuilder::from_test_name("insert_and_fetch");

    let product_id = builder.product_id();
    let id = repo
        .insert(sample_product(&product_id, "Widget", "tools", 3))
        .await
        .unwrap();

    let fetched = repo.find_by_id(id).await.unwrap();
    let fetched = assert_some(fetched, "product should exist");
    assert_eq!(fetched.product_id, product_id);
    assert_eq!(fetched.title, "Widget");
    assert_eq!(fetched.quantity, 3);

    assert!(repo.exists_by_product_id(&product_id).await.unwrap());
    assert!(!repo.exists_by_product_id("00000000").await.unwrap());
    assert!(repo.find_by_id(ObjectId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn title_filter_matches_case_insensitive_substring() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog-test");
    let repo = MongoProductRepository::new(&db);

    repo.insert(sample_product("10000001", "Red Phone", "electronics", 1))
        .await
        .unwrap();
    repo.insert(sample_product("10000002", "Blue Radio", "electronics", 1))
        .await
        .unwrap();

    let filter = ProductFilter {
        title: Some("phone".to_string()),
        ..ProductFilter::default()
    };

    let matches = repo.find_page(&filter, 0, 10).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].title, "Red Phone");
    assert_eq!(repo.count(&filter).await.unwrap(), 1);
}

#[tokio::test]
async fn pages_are_most_recent_first() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog-test");
    let repo = MongoProductRepository::new(&db);

    for i in 0..3 {
        repo.insert(sample_product(
            &format!("2000000{}", i),
            &format!("Item {}", i),
            "shelf",
            1,
        ))
        .await
        .unwrap();
    }

    let filter = ProductFilter::default();
    let first_page = repo.find_page(&filter, 0, 2).await.unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].title, "Item 2");
    assert_eq!(first_page[1].title, "Item 1");

    let second_page = repo.find_page(&filter, 2, 2).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].title, "Item 0");
}

#[tokio::test]
async fn totals_cover_the_whole_filtered_set() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog-test");
    let repo = MongoProductRepository::new(&db);

    repo.insert(sample_product("30000001", "A", "bulk", 2))
        .await
        .unwrap();
    repo.insert(sample_product("30000002", "B", "bulk", 5))
        .await
        .unwrap();
    repo.insert(sample_product("30000003", "C", "other", 7))
        .await
        .unwrap();

    let filter = ProductFilter {
        category: Some("bulk".to_string()),
        ..ProductFilter::default()
    };

    let totals = repo.totals(&filter).await.unwrap();
    assert_eq!(totals.total_quantity, 7);
    assert_eq!(totals.total_buying_price, 20.0);
    assert_eq!(totals.total_selling_price, 30.0);

    // An empty filtered set yields zero totals, not an error
    let empty = ProductFilter {
        category: Some("missing".to_string()),
        ..ProductFilter::default()
    };
    assert_eq!(repo.totals(&empty).await.unwrap(), ProductTotals::default());
}

#[tokio::test]
async fn delete_reports_whether_a_document_was_removed() {
    let mongo = TestMongo::new().await;
    let db = mongo.database("catalog-test");
    let repo = MongoProductRepository::new(&db);

    let id = repo
        .insert(sample_product("40000001", "Doomed", "trash", 1))
        .await
        .unwrap();

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert_eq!(repo.count(&ProductFilter::default()).await.unwrap(), 0);
}
