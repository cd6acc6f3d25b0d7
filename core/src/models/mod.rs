// shopfront/src/models/mod.rs

//! Records owned by the stores.

pub mod cart_entry;
pub mod item;

pub use cart_entry::{CartChange, CartEntry, CartUpsert};
pub use item::{Item, NewItem};

use crate::error::{ShopError, ShopResult};
use uuid::Uuid;

/// Parses a client-supplied identifier. A malformed identifier cannot name an
/// existing record, so it is reported as `NotFound` rather than `Validation`.
pub fn parse_record_id(raw: &str, kind: &str) -> ShopResult<Uuid> {
  Uuid::parse_str(raw.trim()).map_err(|_| ShopError::NotFound(format!("{} with ID {} not found.", kind, raw)))
}
