// shopfront_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use shopfront::ShopError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Storage Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Store Error: {source}")]
  Store {
    #[source]
    source: anyhow::Error,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Core errors are split back out so client errors keep their status codes.
impl From<ShopError> for AppError {
  fn from(err: ShopError) -> Self {
    match err {
      ShopError::Validation(m) => AppError::Validation(m),
      ShopError::NotFound(m) => AppError::NotFound(m),
      ShopError::Store { source } => match source.downcast::<sqlx::Error>() {
        Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
        Err(other) => AppError::Store { source: other },
      },
      other @ (ShopError::HandlerMissing { .. } | ShopError::Internal(_)) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Validation(m) => {
        tracing::warn!(application_error = %self, "Responding with client error");
        HttpResponse::BadRequest().json(json!({"error": m}))
      }
      AppError::NotFound(m) => {
        tracing::warn!(application_error = %self, "Responding with client error");
        HttpResponse::NotFound().json(json!({"error": m}))
      }
      AppError::Config(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) | AppError::Store { .. } => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"}))
      }
      AppError::Io(_) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Storage operation failed"}))
      }
      AppError::Internal(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
