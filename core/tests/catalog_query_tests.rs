// tests/catalog_query_tests.rs
mod common;

use common::*;
use serial_test::serial;
use shopfront::catalog::NumericField;
use shopfront::store::memory::MemoryImageStore;
use shopfront::{Catalog, CatalogQuery, ImageUpload, NewProduct, ShopError};
use std::sync::Arc;

fn query(pairs: &[(&str, &str)]) -> CatalogQuery {
  CatalogQuery::from_pairs(pairs.iter().copied())
}

#[tokio::test]
#[serial]
async fn test_default_sort_is_product_name_ascending() {
  setup_tracing();
  let fx = Fixture::sample();

  let items = fx.catalog.query(CatalogQuery::default()).await.unwrap();
  assert_eq!(
    names(&items),
    vec!["Canvas Tote", "Leather Boot", "Shoelace Pack", "Trail Runner", "Wool Socks"]
  );

  let unknown = fx.catalog.query(query(&[("sortBy", "popularity")])).await.unwrap();
  assert_eq!(names(&unknown), names(&items));
}

#[tokio::test]
#[serial]
async fn test_sort_by_offer_price() {
  setup_tracing();
  let fx = Fixture::sample();

  let descending = fx.catalog.query(query(&[("sortBy", "descending")])).await.unwrap();
  assert_eq!(offer_prices(&descending), vec![60.0, 45.0, 15.0, 10.0, 5.0]);

  let ascending = fx.catalog.query(query(&[("sortBy", "ascending")])).await.unwrap();
  assert_eq!(offer_prices(&ascending), vec![5.0, 10.0, 15.0, 45.0, 60.0]);
}

#[tokio::test]
#[serial]
async fn test_search_matches_name_or_category_case_insensitively() {
  setup_tracing();
  let fx = Fixture::sample();

  // "shoe" hits the "Shoes" category and the "Shoelace Pack" name.
  let items = fx.catalog.query(query(&[("search", "shoe")])).await.unwrap();
  assert_eq!(names(&items), vec!["Leather Boot", "Shoelace Pack", "Trail Runner"]);

  let shouting = fx.catalog.query(query(&[("search", "  SHOE ")])).await.unwrap();
  assert_eq!(names(&shouting), names(&items));

  let none = fx.catalog.query(query(&[("search", "umbrella")])).await.unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
#[serial]
async fn test_search_and_category_are_combined_with_and() {
  setup_tracing();
  let fx = Fixture::sample();

  let items = fx
    .catalog
    .query(query(&[("search", "shoe"), ("category", "Accessories")]))
    .await
    .unwrap();
  assert_eq!(names(&items), vec!["Shoelace Pack"]);
}

#[tokio::test]
#[serial]
async fn test_category_membership_and_all_sentinel() {
  setup_tracing();
  let fx = Fixture::sample();

  let shoes_and_bags = fx
    .catalog
    .query(query(&[("category", "Shoes"), ("category", "Bags")]))
    .await
    .unwrap();
  assert_eq!(names(&shoes_and_bags), vec!["Canvas Tote", "Leather Boot", "Trail Runner"]);

  let all = fx
    .catalog
    .query(query(&[("category", "Shoes"), ("category", "all")]))
    .await
    .unwrap();
  assert_eq!(all.len(), 5);

  // Exact membership, not substring.
  let partial = fx.catalog.query(query(&[("category", "Sho")])).await.unwrap();
  assert!(partial.is_empty());
}

#[tokio::test]
#[serial]
async fn test_price_range_narrowing() {
  setup_tracing();
  let fx = Fixture::with_items(vec![
    new_item("Alpha", "Misc", 5.0),
    new_item("Bravo", "Misc", 10.0),
    new_item("Charlie", "Misc", 15.0),
  ]);

  let narrowed = fx
    .catalog
    .query(query(&[("lowerPrice", "8"), ("higherPrice", "15")]))
    .await
    .unwrap();
  assert_eq!(offer_prices(&narrowed), vec![10.0, 15.0]);

  let unbounded = fx
    .catalog
    .query(query(&[("lowerPrice", "0"), ("higherPrice", "0")]))
    .await
    .unwrap();
  assert_eq!(offer_prices(&unbounded), vec![5.0, 10.0, 15.0]);

  let degenerate = fx.catalog.query(query(&[("lowerPrice", "10"), ("higherPrice", "0")])).await;
  assert!(matches!(degenerate, Err(ShopError::Validation(_))));

  let only_lower = fx.catalog.query(query(&[("lowerPrice", "10")])).await;
  assert!(matches!(only_lower, Err(ShopError::Validation(_))));
}

#[tokio::test]
#[serial]
async fn test_malformed_price_bounds_are_coerced_to_zero() {
  setup_tracing();
  let fx = Fixture::with_items(vec![
    new_item("Alpha", "Misc", 5.0),
    new_item("Bravo", "Misc", 10.0),
    new_item("Charlie", "Misc", 15.0),
  ]);

  let items = fx
    .catalog
    .query(query(&[("lowerPrice", "cheap"), ("higherPrice", "12")]))
    .await
    .unwrap();
  assert_eq!(offer_prices(&items), vec![5.0, 10.0]);

  let both_bad = fx
    .catalog
    .query(query(&[("lowerPrice", "x"), ("higherPrice", "y")]))
    .await
    .unwrap();
  assert_eq!(both_bad.len(), 3);
}

#[tokio::test]
#[serial]
async fn test_narrowing_preserves_sort_order() {
  setup_tracing();
  let fx = Fixture::sample();

  let items = fx
    .catalog
    .query(query(&[("sortBy", "descending"), ("lowerPrice", "10"), ("higherPrice", "50")]))
    .await
    .unwrap();
  assert_eq!(offer_prices(&items), vec![45.0, 15.0, 10.0]);
}

#[tokio::test]
#[serial]
async fn test_store_failure_surfaces_as_store_error() {
  setup_tracing();
  let catalog = Catalog::new(Arc::new(UnavailableItemStore), Arc::new(MemoryImageStore::new()));

  let result = catalog.query(CatalogQuery::default()).await;
  match result {
    Err(ShopError::Store { source }) => assert!(source.to_string().contains("unavailable")),
    other => panic!("Expected ShopError::Store, got {:?}", other.map(|items| items.len())),
  }
}

#[tokio::test]
#[serial]
async fn test_find_item() {
  setup_tracing();
  let fx = Fixture::sample();
  let boot = fx.item_named("Leather Boot").await;

  let found = fx.catalog.find_item(&boot.id.to_string()).await.unwrap();
  assert_eq!(found, boot);

  let missing = fx.catalog.find_item(&uuid::Uuid::new_v4().to_string()).await;
  assert!(matches!(missing, Err(ShopError::NotFound(_))));

  let malformed = fx.catalog.find_item("not-an-id").await;
  assert!(matches!(malformed, Err(ShopError::NotFound(_))));
}

fn product(name: &str) -> NewProduct {
  NewProduct {
    product_name: Some(name.to_string()),
    category: Some("Outdoor".to_string()),
    rating: Some(NumericField::Number(4.2)),
    price: Some(NumericField::Text("80".to_string())),
    offer_price: Some(NumericField::Number(64.0)),
    offer_percentage: Some(NumericField::Number(20.0)),
    image_url: None,
  }
}

#[tokio::test]
#[serial]
async fn test_add_item_with_image_records_reference() {
  setup_tracing();
  let fx = Fixture::with_items(Vec::new());

  let upload = ImageUpload {
    original_name: "tent.png".to_string(),
    bytes: vec![0x89, 0x50, 0x4e, 0x47],
  };
  let item = fx.catalog.add_item(product("Dome Tent"), Some(upload.clone())).await.unwrap();

  let reference = item.image_url.clone().expect("image reference recorded");
  assert!(reference.ends_with("tent.png"));
  assert_eq!(fx.images.get(&reference), Some(upload));
  assert_eq!(item.price, 80.0);

  let listed = fx.catalog.query(CatalogQuery::default()).await.unwrap();
  assert_eq!(listed, vec![item]);
}

#[tokio::test]
#[serial]
async fn test_add_item_without_image_skips_image_storage() {
  setup_tracing();
  let fx = Fixture::with_items(Vec::new());

  let item = fx.catalog.add_item(product("Camp Stove"), None).await.unwrap();
  assert_eq!(item.image_url, None);
  assert_eq!(fx.items.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_add_item_rejects_missing_fields_without_storing() {
  setup_tracing();
  let fx = Fixture::with_items(Vec::new());

  let mut incomplete = product("Headlamp");
  incomplete.price = None;
  let upload = ImageUpload {
    original_name: "lamp.jpg".to_string(),
    bytes: vec![1, 2, 3],
  };

  let result = fx.catalog.add_item(incomplete, Some(upload)).await;
  assert!(matches!(result, Err(ShopError::Validation(_))));
  assert!(fx.items.is_empty());
  assert_eq!(fx.images.get("memory://0-lamp.jpg"), None);
}
