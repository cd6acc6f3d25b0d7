// shopfront_app/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod services;
mod state;
mod web;

use crate::config::{AppConfig, LogFormat, StoreBackend};
use crate::db::{PgCartStore, PgItemStore};
use crate::errors::{AppError, Result as AppResult};
use crate::services::LocalImageStore;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use shopfront::store::memory::{MemoryCartStore, MemoryItemStore};
use shopfront::{CartStore, ItemStore};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

/// Builds the selected stores and wires them into the shared state.
async fn build_state(config: &AppConfig) -> AppResult<AppState> {
  let images = Arc::new(LocalImageStore::new(config.image_dir.clone()));

  let (items, carts): (Arc<dyn ItemStore>, Arc<dyn CartStore>) = match config.store_backend {
    StoreBackend::Postgres => {
      let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::Config("DATABASE_URL is required by the postgres backend".to_string()))?;
      let pool = db::connect(database_url, config.db_max_connections).await?;
      if config.ensure_schema {
        db::ensure_schema(&pool).await?;
      }
      (Arc::new(PgItemStore::new(pool.clone())), Arc::new(PgCartStore::new(pool)))
    }
    StoreBackend::Memory => {
      tracing::warn!("Using in-memory stores; catalog and cart are lost on restart.");
      (Arc::new(MemoryItemStore::new()), Arc::new(MemoryCartStore::new()))
    }
  };

  if config.seed_db {
    db::seed::seed_items(items.as_ref()).await?;
  }

  Ok(AppState::new(items, carts, images))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => {
      init_tracing(cfg.log_format);
      Arc::new(cfg)
    }
    Err(e) => {
      init_tracing(LogFormat::Pretty);
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  tracing::info!(backend = ?app_config.store_backend, "Starting shopfront server...");

  let app_state = match build_state(&app_config).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize stores.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  let cors_origin = app_config.cors_allow_origin.clone();
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(web::cors(&cors_origin))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
