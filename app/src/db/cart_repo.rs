// shopfront_app/src/db/cart_repo.rs

use super::store_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shopfront::{CartChange, CartEntry, CartStore, CartUpsert, ShopError, ShopResult};
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
struct CartEntryRow {
  id: Uuid,
  item_id: Uuid,
  quantity: i32,
  added_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<CartEntryRow> for CartEntry {
  fn from(row: CartEntryRow) -> Self {
    CartEntry {
      id: row.id,
      item_id: row.item_id,
      quantity: row.quantity,
      added_at: row.added_at,
      updated_at: row.updated_at,
    }
  }
}

#[derive(Debug, FromRow)]
struct UpsertRow {
  #[sqlx(flatten)]
  entry: CartEntryRow,
  /// `xmax` is zero only for a freshly inserted tuple.
  inserted: bool,
}

// A single statement: concurrent first adds for one item serialize on the
// unique index and the losers fall through to the UPDATE arm.
const UPSERT_SQL: &str = "\
  INSERT INTO cart_entries (id, item_id, quantity, added_at, updated_at) \
  VALUES ($1, $2, $3, NOW(), NOW()) \
  ON CONFLICT (item_id) DO UPDATE \
    SET quantity = cart_entries.quantity + EXCLUDED.quantity, updated_at = NOW() \
  RETURNING id, item_id, quantity, added_at, updated_at, (xmax = 0) AS inserted";

#[derive(Clone)]
pub struct PgCartStore {
  pool: PgPool,
}

impl PgCartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CartStore for PgCartStore {
  #[instrument(name = "PgCartStore::list", skip(self), err(Display))]
  async fn list(&self) -> ShopResult<Vec<CartEntry>> {
    let rows: Vec<CartEntryRow> = sqlx::query_as(
      "SELECT id, item_id, quantity, added_at, updated_at FROM cart_entries ORDER BY added_at ASC, id",
    )
    .fetch_all(&self.pool)
    .await
    .map_err(store_error)?;
    Ok(rows.into_iter().map(CartEntry::from).collect())
  }

  #[instrument(name = "PgCartStore::find_by_id", skip(self), err(Display))]
  async fn find_by_id(&self, id: Uuid) -> ShopResult<Option<CartEntry>> {
    let row: Option<CartEntryRow> =
      sqlx::query_as("SELECT id, item_id, quantity, added_at, updated_at FROM cart_entries WHERE id = $1")
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
    Ok(row.map(CartEntry::from))
  }

  #[instrument(name = "PgCartStore::find_by_item_id", skip(self), err(Display))]
  async fn find_by_item_id(&self, item_id: Uuid) -> ShopResult<Option<CartEntry>> {
    let row: Option<CartEntryRow> =
      sqlx::query_as("SELECT id, item_id, quantity, added_at, updated_at FROM cart_entries WHERE item_id = $1")
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;
    Ok(row.map(CartEntry::from))
  }

  #[instrument(name = "PgCartStore::upsert_by_item", skip(self), err(Display))]
  async fn upsert_by_item(&self, item_id: Uuid, quantity: i32) -> ShopResult<CartUpsert> {
    let row: UpsertRow = sqlx::query_as(UPSERT_SQL)
      .bind(Uuid::new_v4())
      .bind(item_id)
      .bind(quantity)
      .fetch_one(&self.pool)
      .await
      .map_err(store_error)?;

    debug!(entry_id = %row.entry.id, inserted = row.inserted, quantity = row.entry.quantity, "Cart entry upserted.");
    let entry = CartEntry::from(row.entry);
    Ok(if row.inserted {
      CartUpsert::Created(entry)
    } else {
      CartUpsert::Updated(entry)
    })
  }

  #[instrument(name = "PgCartStore::apply_delta", skip(self), err(Display))]
  async fn apply_delta(&self, id: Uuid, delta: i32) -> ShopResult<Option<CartChange>> {
    let mut tx = self.pool.begin().await.map_err(store_error)?;

    let current: Option<CartEntryRow> = sqlx::query_as(
      "SELECT id, item_id, quantity, added_at, updated_at FROM cart_entries WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(store_error)?;

    // Dropping the transaction rolls it back.
    let Some(current) = current else {
      return Ok(None);
    };

    let next = i64::from(current.quantity) + i64::from(delta);
    let change = if next <= 0 {
      sqlx::query("DELETE FROM cart_entries WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;
      CartChange::Removed(current.into())
    } else {
      let quantity = i32::try_from(next).map_err(|_| {
        ShopError::Validation(format!(
          "Cart quantity {} cannot be changed by {} without overflowing.",
          current.quantity, delta
        ))
      })?;
      let updated: CartEntryRow = sqlx::query_as(
        "UPDATE cart_entries SET quantity = $2, updated_at = NOW() WHERE id = $1 \
         RETURNING id, item_id, quantity, added_at, updated_at",
      )
      .bind(id)
      .bind(quantity)
      .fetch_one(&mut *tx)
      .await
      .map_err(store_error)?;
      CartChange::Updated(updated.into())
    };

    tx.commit().await.map_err(store_error)?;
    Ok(Some(change))
  }

  #[instrument(name = "PgCartStore::delete", skip(self), err(Display))]
  async fn delete(&self, id: Uuid) -> ShopResult<Option<CartEntry>> {
    let row: Option<CartEntryRow> = sqlx::query_as(
      "DELETE FROM cart_entries WHERE id = $1 RETURNING id, item_id, quantity, added_at, updated_at",
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await
    .map_err(store_error)?;
    Ok(row.map(CartEntry::from))
  }
}
