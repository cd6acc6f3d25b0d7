// shopfront/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
  /// Missing or malformed caller input. Never retried.
  #[error("Validation failed: {0}")]
  Validation(String),

  /// The referenced item or cart entry does not exist.
  #[error("Not found: {0}")]
  NotFound(String),

  /// The backing store failed (connectivity, constraint violation, ...).
  #[error("Store operation failed. Source: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Internal error: {0}")]
  Internal(String),
}

impl ShopError {
  /// Wraps any backend error as a `ShopError::Store`.
  pub fn store<E>(err: E) -> Self
  where
    E: Into<AnyhowError>,
  {
    ShopError::Store { source: err.into() }
  }

  pub fn is_client_error(&self) -> bool {
    matches!(self, ShopError::Validation(_) | ShopError::NotFound(_))
  }
}

impl From<AnyhowError> for ShopError {
  fn from(err: AnyhowError) -> Self {
    // Backends sometimes tunnel a ShopError through anyhow; unwrap it rather than re-wrapping.
    match err.downcast::<ShopError>() {
      Ok(shop_err) => shop_err,
      Err(other) => ShopError::Store { source: other },
    }
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
