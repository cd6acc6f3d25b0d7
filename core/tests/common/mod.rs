// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use shopfront::store::memory::{MemoryCartStore, MemoryImageStore, MemoryItemStore};
use shopfront::{
  CartChange, CartEntry, CartReconciler, CartStore, CartUpsert, Catalog, Item, ItemFilter, ItemSort, ItemStore,
  NewItem, ShopError, ShopResult,
};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

// --- Fixtures ---
pub fn new_item(product_name: &str, category: &str, offer_price: f64) -> NewItem {
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

/// Five items across three categories; offer prices 5..=60.
pub fn sample_items() -> Vec<NewItem> {
  vec![
    new_item("Trail Runner", "Shoes", 60.0),
    new_item("Canvas Tote", "Bags", 15.0),
    new_item("Wool Socks", "Apparel", 5.0),
    new_item("Leather Boot", "Shoes", 45.0),
    new_item("Shoelace Pack", "Accessories", 10.0),
  ]
}

pub struct Fixture {
  pub items: Arc<MemoryItemStore>,
  pub carts: Arc<MemoryCartStore>,
  pub images: Arc<MemoryImageStore>,
  pub catalog: Catalog,
  pub cart: CartReconciler,
}

impl Fixture {
  pub fn with_items(items: Vec<NewItem>) -> Self {
    let item_store = Arc::new(MemoryItemStore::with_items(items));
    let cart_store = Arc::new(MemoryCartStore::new());
    let image_store = Arc::new(MemoryImageStore::new());
    Self {
      catalog: Catalog::new(item_store.clone(), image_store.clone()),
      cart: CartReconciler::new(cart_store.clone(), item_store.clone()),
      items: item_store,
      carts: cart_store,
      images: image_store,
    }
  }

  pub fn sample() -> Self {
    Self::with_items(sample_items())
  }

  /// Looks an item up by name through the store's unfiltered listing.
  pub async fn item_named(&self, product_name: &str) -> Item {
    self
      .items
      .find(&ItemFilter::default(), ItemSort::default())
      .await
      .unwrap()
      .into_iter()
      .find(|item| item.product_name == product_name)
      .unwrap_or_else(|| panic!("fixture has no item named {}", product_name))
  }
}

pub fn names(items: &[Item]) -> Vec<&str> {
  items.iter().map(|item| item.product_name.as_str()).collect()
}

pub fn offer_prices(items: &[Item]) -> Vec<f64> {
  items.iter().map(|item| item.offer_price).collect()
}

// --- Stores that always fail, for error propagation tests ---
pub struct UnavailableItemStore;

#[async_trait]
impl ItemStore for UnavailableItemStore {
  async fn find(&self, _filter: &ItemFilter, _sort: ItemSort) -> ShopResult<Vec<Item>> {
    Err(ShopError::store(anyhow::anyhow!("item store unavailable")))
  }

  async fn find_by_id(&self, _id: Uuid) -> ShopResult<Option<Item>> {
    Err(ShopError::store(anyhow::anyhow!("item store unavailable")))
  }

  async fn create(&self, _item: NewItem) -> ShopResult<Item> {
    Err(ShopError::store(anyhow::anyhow!("item store unavailable")))
  }
}

pub struct UnavailableCartStore;

#[async_trait]
impl CartStore for UnavailableCartStore {
  async fn list(&self) -> ShopResult<Vec<CartEntry>> {
    Err(ShopError::store(anyhow::anyhow!("cart store unavailable")))
  }

  async fn find_by_id(&self, _id: Uuid) -> ShopResult<Option<CartEntry>> {
    Err(ShopError::store(anyhow::anyhow!("cart store unavailable")))
  }

  async fn find_by_item_id(&self, _item_id: Uuid) -> ShopResult<Option<CartEntry>> {
    Err(ShopError::store(anyhow::anyhow!("cart store unavailable")))
  }

  async fn upsert_by_item(&self, _item_id: Uuid, _quantity: i32) -> ShopResult<CartUpsert> {
    Err(ShopError::store(anyhow::anyhow!("cart store unavailable")))
  }

  async fn apply_delta(&self, _id: Uuid, _delta: i32) -> ShopResult<Option<CartChange>> {
    Err(ShopError::store(anyhow::anyhow!("cart store unavailable")))
  }

  async fn delete(&self, _id: Uuid) -> ShopResult<Option<CartEntry>> {
    Err(ShopError::store(anyhow::anyhow!("cart store unavailable")))
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
