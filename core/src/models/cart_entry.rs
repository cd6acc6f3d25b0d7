// shopfront/src/models/cart_entry.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pending purchase quantity for one item. At most one exists per `item_id`,
/// and `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
  pub id: Uuid,
  pub item_id: Uuid,
  pub quantity: i32,
  pub added_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Result of merging an add request into the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartUpsert {
  /// No entry existed for the item; a new one was inserted.
  Created(CartEntry),
  /// The requested quantity was added to the existing entry.
  Updated(CartEntry),
}

impl CartUpsert {
  pub fn entry(&self) -> &CartEntry {
    match self {
      CartUpsert::Created(entry) | CartUpsert::Updated(entry) => entry,
    }
  }

  pub fn into_entry(self) -> CartEntry {
    match self {
      CartUpsert::Created(entry) | CartUpsert::Updated(entry) => entry,
    }
  }

  /// "created" or "updated", as reported to clients.
  pub fn status(&self) -> &'static str {
    match self {
      CartUpsert::Created(_) => "created",
      CartUpsert::Updated(_) => "updated",
    }
  }
}

/// Result of applying a quantity delta to an existing entry.
#[derive(Debug, Clone, PartialEq)]
pub enum CartChange {
  Updated(CartEntry),
  /// The delta would have left the quantity at zero or below, so the entry
  /// was deleted. Carries the last stored state.
  Removed(CartEntry),
}

impl CartChange {
  pub fn entry(&self) -> &CartEntry {
    match self {
      CartChange::Updated(entry) | CartChange::Removed(entry) => entry,
    }
  }

  pub fn is_removed(&self) -> bool {
    matches!(self, CartChange::Removed(_))
  }
}
