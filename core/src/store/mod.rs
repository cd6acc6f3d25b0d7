// shopfront/src/store/mod.rs

//! Interfaces to the persistence and image-storage collaborators.
//!
//! The catalog engine and cart reconciler only ever talk to these traits. Each
//! method is expected to be atomic on its own: in particular
//! [`CartStore::upsert_by_item`] and [`CartStore::apply_delta`] must not be
//! implemented as a read followed by a separate write.

pub mod memory;

use crate::error::ShopResult;
use crate::models::{CartChange, CartEntry, CartUpsert, Item, NewItem};
use async_trait::async_trait;
use std::cmp::Ordering;
use uuid::Uuid;

/// Storage-level item filter. Both parts are ANDed when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
  /// Case-insensitive substring, matched against product name OR category.
  /// Already trimmed and never empty.
  pub search: Option<String>,
  /// Exact category membership.
  pub categories: Option<Vec<String>>,
}

impl ItemFilter {
  pub fn is_empty(&self) -> bool {
    self.search.is_none() && self.categories.is_none()
  }

  /// Reference semantics for backends that filter in process.
  pub fn matches(&self, item: &Item) -> bool {
    if let Some(needle) = &self.search {
      let needle = needle.to_lowercase();
      let hit = item.product_name.to_lowercase().contains(&needle) || item.category.to_lowercase().contains(&needle);
      if !hit {
        return false;
      }
    }
    if let Some(categories) = &self.categories {
      if !categories.iter().any(|c| c == &item.category) {
        return false;
      }
    }
    true
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemSort {
  OfferPriceAscending,
  OfferPriceDescending,
  #[default]
  ProductNameAscending,
}

impl ItemSort {
  /// `"ascending"` / `"descending"` sort by offer price; anything else by name.
  pub fn from_param(sort_by: Option<&str>) -> Self {
    match sort_by.map(str::trim) {
      Some("ascending") => ItemSort::OfferPriceAscending,
      Some("descending") => ItemSort::OfferPriceDescending,
      _ => ItemSort::ProductNameAscending,
    }
  }

  pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
    match self {
      ItemSort::OfferPriceAscending => a.offer_price.total_cmp(&b.offer_price),
      ItemSort::OfferPriceDescending => b.offer_price.total_cmp(&a.offer_price),
      ItemSort::ProductNameAscending => a.product_name.cmp(&b.product_name),
    }
  }
}

#[async_trait]
pub trait ItemStore: Send + Sync {
  /// Returns every item matching `filter`, ordered by `sort`.
  async fn find(&self, filter: &ItemFilter, sort: ItemSort) -> ShopResult<Vec<Item>>;

  async fn find_by_id(&self, id: Uuid) -> ShopResult<Option<Item>>;

  async fn create(&self, item: NewItem) -> ShopResult<Item>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
  /// All entries, oldest first.
  async fn list(&self) -> ShopResult<Vec<CartEntry>>;

  async fn find_by_id(&self, id: Uuid) -> ShopResult<Option<CartEntry>>;

  async fn find_by_item_id(&self, item_id: Uuid) -> ShopResult<Option<CartEntry>>;

  /// Inserts an entry for `item_id` with `quantity`, or adds `quantity` to the
  /// existing one, in a single atomic operation.
  async fn upsert_by_item(&self, item_id: Uuid, quantity: i32) -> ShopResult<CartUpsert>;

  /// Atomically adds `delta` to the entry's quantity. When the result would
  /// be zero or below the entry is deleted instead. `None` if no entry has `id`.
  async fn apply_delta(&self, id: Uuid, delta: i32) -> ShopResult<Option<CartChange>>;

  /// Deletes the entry, returning its last state. `None` if no entry has `id`.
  async fn delete(&self, id: Uuid) -> ShopResult<Option<CartEntry>>;
}

/// An uploaded product photo, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
  pub original_name: String,
  pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
  /// Persists the upload and returns the reference to record on the item.
  async fn store(&self, upload: ImageUpload) -> ShopResult<String>;
}
