// shopfront/src/store/memory.rs

//! In-process stores. Each store guards its records with a single mutex and
//! never awaits while holding it, so every trait method is atomic.

use super::{CartStore, ImageStore, ImageUpload, ItemFilter, ItemSort, ItemStore};
use crate::error::{ShopError, ShopResult};
use crate::models::{CartChange, CartEntry, CartUpsert, Item, NewItem};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::{event, Level};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryItemStore {
  items: Mutex<Vec<Item>>,
}

impl MemoryItemStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a store holding `items`, assigning fresh identifiers.
  pub fn with_items(items: impl IntoIterator<Item = NewItem>) -> Self {
    let items = items.into_iter().map(|new_item| new_item.into_item(Uuid::new_v4())).collect();
    Self {
      items: Mutex::new(items),
    }
  }

  pub fn len(&self) -> usize {
    self.items.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.lock().is_empty()
  }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
  async fn find(&self, filter: &ItemFilter, sort: ItemSort) -> ShopResult<Vec<Item>> {
    let mut found: Vec<Item> = {
      let guard = self.items.lock();
      guard.iter().filter(|item| filter.matches(item)).cloned().collect()
    };
    // Stable, so ties keep insertion order.
    found.sort_by(|a, b| sort.compare(a, b));
    Ok(found)
  }

  async fn find_by_id(&self, id: Uuid) -> ShopResult<Option<Item>> {
    Ok(self.items.lock().iter().find(|item| item.id == id).cloned())
  }

  async fn create(&self, item: NewItem) -> ShopResult<Item> {
    let item = item.into_item(Uuid::new_v4());
    self.items.lock().push(item.clone());
    event!(Level::DEBUG, item_id = %item.id, "Item stored in memory.");
    Ok(item)
  }
}

#[derive(Debug, Default)]
pub struct MemoryCartStore {
  entries: Mutex<Vec<CartEntry>>,
}

impl MemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn overflow_error(current: i32, delta: i32) -> ShopError {
  ShopError::Validation(format!(
    "Cart quantity {} cannot be changed by {} without overflowing.",
    current, delta
  ))
}

#[async_trait]
impl CartStore for MemoryCartStore {
  async fn list(&self) -> ShopResult<Vec<CartEntry>> {
    Ok(self.entries.lock().clone())
  }

  async fn find_by_id(&self, id: Uuid) -> ShopResult<Option<CartEntry>> {
    Ok(self.entries.lock().iter().find(|e| e.id == id).cloned())
  }

  async fn find_by_item_id(&self, item_id: Uuid) -> ShopResult<Option<CartEntry>> {
    Ok(self.entries.lock().iter().find(|e| e.item_id == item_id).cloned())
  }

  async fn upsert_by_item(&self, item_id: Uuid, quantity: i32) -> ShopResult<CartUpsert> {
    let mut guard = self.entries.lock();
    let now = Utc::now();

    if let Some(existing) = guard.iter_mut().find(|e| e.item_id == item_id) {
      let current = existing.quantity;
      existing.quantity = current.checked_add(quantity).ok_or_else(|| overflow_error(current, quantity))?;
      existing.updated_at = now;
      return Ok(CartUpsert::Updated(existing.clone()));
    }

    let entry = CartEntry {
      id: Uuid::new_v4(),
      item_id,
      quantity,
      added_at: now,
      updated_at: now,
    };
    guard.push(entry.clone());
    Ok(CartUpsert::Created(entry))
  }

  async fn apply_delta(&self, id: Uuid, delta: i32) -> ShopResult<Option<CartChange>> {
    let mut guard = self.entries.lock();
    let Some(idx) = guard.iter().position(|e| e.id == id) else {
      return Ok(None);
    };

    let current = guard[idx].quantity;
    let next = current.checked_add(delta).ok_or_else(|| overflow_error(current, delta))?;
    if next <= 0 {
      let removed = guard.remove(idx);
      return Ok(Some(CartChange::Removed(removed)));
    }

    let entry = &mut guard[idx];
    entry.quantity = next;
    entry.updated_at = Utc::now();
    Ok(Some(CartChange::Updated(entry.clone())))
  }

  async fn delete(&self, id: Uuid) -> ShopResult<Option<CartEntry>> {
    let mut guard = self.entries.lock();
    let position = guard.iter().position(|e| e.id == id);
    Ok(position.map(|idx| guard.remove(idx)))
  }
}

/// Keeps uploads in memory and hands back `memory://<n>-<name>` references.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
  images: Mutex<Vec<(String, ImageUpload)>>,
}

impl MemoryImageStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, reference: &str) -> Option<ImageUpload> {
    self
      .images
      .lock()
      .iter()
      .find(|(r, _)| r == reference)
      .map(|(_, upload)| upload.clone())
  }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
  async fn store(&self, upload: ImageUpload) -> ShopResult<String> {
    let mut guard = self.images.lock();
    let reference = format!("memory://{}-{}", guard.len(), upload.original_name);
    guard.push((reference.clone(), upload));
    Ok(reference)
  }
}
