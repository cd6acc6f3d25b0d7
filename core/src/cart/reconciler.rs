// shopfront/src/cart/reconciler.rs

//! Cart Reconciler: merge-or-create on add, atomic increment/decrement with
//! removal at zero, and explicit removal.

use crate::cart::quantity::{normalize_quantity, DEFAULT_QUANTITY};
use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::error::{ShopError, ShopResult};
use crate::models::{parse_record_id, CartChange, CartEntry, CartUpsert};
use crate::pipeline::Pipeline;
use crate::store::{CartStore, ItemStore};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Body of an add-to-cart request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
  pub item_id: Option<String>,
  /// Number or numeric string; normalized to a positive integer.
  pub quantity: Option<Value>,
}

#[derive(Clone)]
pub struct AddToCartCtxData {
  pub items: Arc<dyn ItemStore>,
  pub carts: Arc<dyn CartStore>,
  pub request: AddToCart,
  pub item_id: Option<Uuid>,
  pub quantity: i32,
  pub outcome: Option<CartUpsert>,
}

pub struct CartReconciler {
  carts: Arc<dyn CartStore>,
  items: Arc<dyn ItemStore>,
  add_pipeline: Pipeline<AddToCartCtxData>,
}

fn build_add_to_cart_pipeline() -> Pipeline<AddToCartCtxData> {
  let mut p = Pipeline::<AddToCartCtxData>::new(&[
    ("validate_cart_input", false, None),
    ("normalize_quantity", false, None),
    ("verify_item_exists", false, None),
    ("upsert_cart_entry", false, None),
  ]);

  p.on_step("validate_cart_input", |ctx: ContextData<AddToCartCtxData>| async move {
    let present = {
      let guard = ctx.read();
      guard.request.item_id.as_deref().is_some_and(|id| !id.trim().is_empty())
    };
    if !present {
      warn!("Add to cart rejected: itemId is missing.");
      return Err(ShopError::Validation("itemId is required.".to_string()));
    }
    Ok(PipelineControl::Continue)
  });

  p.on_step("normalize_quantity", |ctx: ContextData<AddToCartCtxData>| async move {
    let mut guard = ctx.write();
    let quantity = normalize_quantity(guard.request.quantity.as_ref());
    guard.quantity = quantity;
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p.on_step("verify_item_exists", |ctx: ContextData<AddToCartCtxData>| async move {
    let (items, raw_id) = {
      let guard = ctx.read();
      (guard.items.clone(), guard.request.item_id.clone().unwrap_or_default())
    };
    let item_id = parse_record_id(&raw_id, "Item")?;
    if items.find_by_id(item_id).await?.is_none() {
      warn!(item_id = %item_id, "Add to cart rejected: item does not exist.");
      return Err(ShopError::NotFound(format!("Item with ID {} not found.", item_id)));
    }
    ctx.write().item_id = Some(item_id);
    Ok(PipelineControl::Continue)
  });

  // Single atomic upsert keyed by item id; concurrent first adds cannot both insert.
  p.on_step("upsert_cart_entry", |ctx: ContextData<AddToCartCtxData>| async move {
    let (carts, item_id, quantity) = {
      let guard = ctx.read();
      (guard.carts.clone(), guard.item_id, guard.quantity)
    };
    let item_id = item_id.ok_or_else(|| ShopError::Internal("Cart upsert reached without a verified item.".to_string()))?;
    let outcome = carts.upsert_by_item(item_id, quantity).await?;
    info!(
      item_id = %item_id,
      cart_entry_id = %outcome.entry().id,
      added = quantity,
      quantity = outcome.entry().quantity,
      status = outcome.status(),
      "Cart entry upserted."
    );
    ctx.write().outcome = Some(outcome);
    Ok::<_, ShopError>(PipelineControl::Continue)
  });

  p
}

impl CartReconciler {
  pub fn new(carts: Arc<dyn CartStore>, items: Arc<dyn ItemStore>) -> Self {
    Self {
      carts,
      items,
      add_pipeline: build_add_to_cart_pipeline(),
    }
  }

  #[instrument(name = "CartReconciler::list", skip(self), err(Display))]
  pub async fn list(&self) -> ShopResult<Vec<CartEntry>> {
    self.carts.list().await
  }

  /// Adds `request.quantity` of an item, merging into its existing entry if any.
  #[instrument(
    name = "CartReconciler::add_or_merge",
    skip_all,
    fields(item_id = ?request.item_id, quantity = ?request.quantity),
    err(Display)
  )]
  pub async fn add_or_merge(&self, request: AddToCart) -> ShopResult<CartUpsert> {
    let ctx_data = ContextData::new(AddToCartCtxData {
      items: self.items.clone(),
      carts: self.carts.clone(),
      request,
      item_id: None,
      quantity: DEFAULT_QUANTITY,
      outcome: None,
    });

    match self.add_pipeline.run(ctx_data.clone()).await? {
      PipelineResult::Completed => ctx_data
        .into_inner()
        .outcome
        .ok_or_else(|| ShopError::Internal("Add to cart completed without an outcome.".to_string())),
      PipelineResult::Stopped => Err(ShopError::Internal("Add to cart was halted.".to_string())),
    }
  }

  #[instrument(name = "CartReconciler::increment", skip(self), err(Display))]
  pub async fn increment(&self, raw_entry_id: &str) -> ShopResult<CartEntry> {
    let id = parse_record_id(raw_entry_id, "Cart entry")?;
    match self.carts.apply_delta(id, 1).await? {
      Some(CartChange::Updated(entry)) => {
        info!(cart_entry_id = %id, quantity = entry.quantity, "Cart entry incremented.");
        Ok(entry)
      }
      // +1 on a stored quantity >= 1 cannot empty the entry.
      Some(CartChange::Removed(entry)) => Err(ShopError::Internal(format!(
        "Cart entry {} was removed by an increment (stored quantity {}).",
        id, entry.quantity
      ))),
      None => Err(cart_entry_not_found(id)),
    }
  }

  /// Decrements by one; an entry that would reach zero is deleted instead.
  #[instrument(name = "CartReconciler::decrement", skip(self), err(Display))]
  pub async fn decrement(&self, raw_entry_id: &str) -> ShopResult<CartChange> {
    let id = parse_record_id(raw_entry_id, "Cart entry")?;
    let change = self.carts.apply_delta(id, -1).await?.ok_or_else(|| cart_entry_not_found(id))?;
    match &change {
      CartChange::Updated(entry) => info!(cart_entry_id = %id, quantity = entry.quantity, "Cart entry decremented."),
      CartChange::Removed(_) => info!(cart_entry_id = %id, "Cart entry reached zero and was removed."),
    }
    Ok(change)
  }

  /// Deletes the entry and echoes its last state.
  #[instrument(name = "CartReconciler::remove", skip(self), err(Display))]
  pub async fn remove(&self, raw_entry_id: &str) -> ShopResult<CartEntry> {
    let id = parse_record_id(raw_entry_id, "Cart entry")?;
    let removed = self.carts.delete(id).await?.ok_or_else(|| cart_entry_not_found(id))?;
    info!(cart_entry_id = %id, item_id = %removed.item_id, "Cart entry removed.");
    Ok(removed)
  }
}

fn cart_entry_not_found(id: Uuid) -> ShopError {
  warn!(cart_entry_id = %id, "Cart entry not found.");
  ShopError::NotFound(format!("Cart entry with ID {} not found.", id))
}
