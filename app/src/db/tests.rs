// shopfront_app/src/db/tests.rs

//! Run against a live PostgreSQL with
//! `TEST_DATABASE_URL=postgres://... cargo test -p shopfront_app -- --ignored`.

use super::{connect, ensure_schema, PgCartStore, PgItemStore};
use shopfront::{CartChange, CartStore, CartUpsert, ItemFilter, ItemSort, ItemStore, NewItem, ShopError};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

async fn test_pool() -> PgPool {
  let url = std::env::var("TEST_DATABASE_URL")
    .or_else(|_| std::env::var("DATABASE_URL"))
    .expect("TEST_DATABASE_URL or DATABASE_URL must point at a scratch database");
  let pool = connect(&url, 8).await.unwrap();
  ensure_schema(&pool).await.unwrap();
  pool
}

fn new_item(product_name: &str, category: &str, offer_price: f64) -> NewItem {
  NewItem {
    product_name: product_name.to_string(),
    category: category.to_string(),
    rating: 4.0,
    price: offer_price + 10.0,
    offer_price,
    offer_percentage: 10.0,
    image_url: None,
  }
}

/// Each test works on its own category so runs never see each other's rows.
fn unique_category() -> String {
  format!("test-{}", Uuid::new_v4())
}

#[tokio::test]
#[ignore]
async fn upsert_reports_created_then_updated() {
  let pool = test_pool().await;
  let items = PgItemStore::new(pool.clone());
  let carts = PgCartStore::new(pool);
  let item = items.create(new_item("Upsert Boot", &unique_category(), 40.0)).await.unwrap();

  let first = carts.upsert_by_item(item.id, 2).await.unwrap();
  assert!(matches!(first, CartUpsert::Created(_)));
  let second = carts.upsert_by_item(item.id, 3).await.unwrap();
  assert!(matches!(second, CartUpsert::Updated(_)));
  assert_eq!(second.entry().id, first.entry().id);
  assert_eq!(second.entry().quantity, 5);

  carts.delete(first.entry().id).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn concurrent_first_adds_converge_to_one_row() {
  let pool = test_pool().await;
  let items = PgItemStore::new(pool.clone());
  let carts = Arc::new(PgCartStore::new(pool));
  let item = items.create(new_item("Race Runner", &unique_category(), 80.0)).await.unwrap();

  let mut tasks = Vec::new();
  for quantity in 1..=16 {
    let carts = carts.clone();
    tasks.push(tokio::spawn(async move { carts.upsert_by_item(item.id, quantity).await }));
  }
  let mut created = 0;
  for task in tasks {
    if let CartUpsert::Created(_) = task.await.unwrap().unwrap() {
      created += 1;
    }
  }
  assert_eq!(created, 1);

  let entry = carts.find_by_item_id(item.id).await.unwrap().unwrap();
  assert_eq!(entry.quantity, (1..=16).sum::<i32>());
  carts.delete(entry.id).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn deltas_lock_the_row_and_remove_at_zero() {
  let pool = test_pool().await;
  let items = PgItemStore::new(pool.clone());
  let carts = Arc::new(PgCartStore::new(pool));
  let item = items.create(new_item("Delta Socks", &unique_category(), 5.0)).await.unwrap();
  let entry = carts.upsert_by_item(item.id, 11).await.unwrap().into_entry();

  let mut tasks = Vec::new();
  for i in 0..40 {
    let carts = carts.clone();
    let delta = if i % 4 == 0 { -1 } else { 1 };
    tasks.push(tokio::spawn(async move { carts.apply_delta(entry.id, delta).await }));
  }
  for task in tasks {
    assert!(matches!(task.await.unwrap().unwrap(), Some(CartChange::Updated(_))));
  }
  // 30 increments, 10 decrements.
  assert_eq!(carts.find_by_id(entry.id).await.unwrap().unwrap().quantity, 31);

  let drained = carts.apply_delta(entry.id, -31).await.unwrap();
  match drained {
    Some(CartChange::Removed(last)) => assert_eq!(last.quantity, 31),
    other => panic!("Expected removal, got {:?}", other),
  }
  assert!(carts.find_by_id(entry.id).await.unwrap().is_none());
  assert!(carts.apply_delta(entry.id, 1).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn merge_overflow_is_a_validation_error() {
  let pool = test_pool().await;
  let items = PgItemStore::new(pool.clone());
  let carts = PgCartStore::new(pool);
  let item = items.create(new_item("Overflow Tote", &unique_category(), 15.0)).await.unwrap();
  let entry = carts.upsert_by_item(item.id, i32::MAX).await.unwrap().into_entry();

  let overflow = carts.upsert_by_item(item.id, 1).await;
  assert!(matches!(overflow, Err(ShopError::Validation(_))), "{:?}", overflow);
  let increment = carts.apply_delta(entry.id, 1).await;
  assert!(matches!(increment, Err(ShopError::Validation(_))), "{:?}", increment);
  assert_eq!(carts.find_by_id(entry.id).await.unwrap().unwrap().quantity, i32::MAX);

  carts.delete(entry.id).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn name_order_matches_the_in_memory_order() {
  let pool = test_pool().await;
  let items = PgItemStore::new(pool);
  let category = unique_category();
  for name in ["apple", "Zebra", "banana", "Banana"] {
    items.create(new_item(name, &category, 1.0)).await.unwrap();
  }

  let filter = ItemFilter {
    search: None,
    categories: Some(vec![category]),
  };
  let found = items.find(&filter, ItemSort::ProductNameAscending).await.unwrap();
  let mut expected = found.clone();
  expected.sort_by(|a, b| ItemSort::ProductNameAscending.compare(a, b));

  let names: Vec<&str> = found.iter().map(|item| item.product_name.as_str()).collect();
  assert_eq!(names, vec!["Banana", "Zebra", "apple", "banana"]);
  assert_eq!(found, expected);
}
