// shopfront_app/src/db/mod.rs

//! PostgreSQL-backed stores.

pub mod cart_repo;
pub mod item_repo;
pub mod seed;

#[cfg(test)]
mod tests;

pub use cart_repo::PgCartStore;
pub use item_repo::PgItemStore;

use crate::errors::Result as AppResult;
use shopfront::ShopError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, instrument};

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// SQLSTATE `numeric_value_out_of_range`, raised when a merged quantity
/// exceeds the INTEGER column.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

#[instrument(name = "db::connect", skip(database_url))]
pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(max_connections)
    .connect(database_url)
    .await?;
  info!("Successfully connected to the database.");
  Ok(pool)
}

#[instrument(name = "db::ensure_schema", skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> AppResult<()> {
  sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
  info!("Database schema ensured.");
  Ok(())
}

/// Maps a driver error onto the core taxonomy. Quantity overflow is the
/// caller's fault; everything else is a store failure.
pub(crate) fn store_error(err: sqlx::Error) -> ShopError {
  if let sqlx::Error::Database(db_err) = &err {
    if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
      return ShopError::Validation("Cart quantity cannot be increased any further.".to_string());
    }
  }
  ShopError::store(err)
}
