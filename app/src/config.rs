// shopfront_app/src/config.rs

use crate::errors::{AppError, Result};
use actix_web::http::Uri;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  Memory,
}

impl FromStr for StoreBackend {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" => Ok(StoreBackend::Postgres),
      "memory" => Ok(StoreBackend::Memory),
      other => Err(AppError::Config(format!(
        "Invalid STORE_BACKEND '{}': expected 'postgres' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,
  /// Required when `store_backend` is Postgres.
  pub database_url: Option<String>,
  pub db_max_connections: u32,
  pub ensure_schema: bool,
  pub seed_db: bool,
  pub image_dir: PathBuf,
  pub cors_allow_origin: String,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. Unset and blank values fall
  /// back to their defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| lookup(var_name).filter(|v| !v.trim().is_empty());

    let parse_bool = |var_name: &str, default: bool| -> Result<bool> {
      match get_env(var_name) {
        Some(raw) => raw
          .trim()
          .parse::<bool>()
          .map_err(|e| AppError::Config(format!("Invalid {} value: {}", var_name, e))),
        None => Ok(default),
      }
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .trim()
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let store_backend = match get_env("STORE_BACKEND") {
      Some(raw) => raw.parse::<StoreBackend>()?,
      None => StoreBackend::Postgres,
    };
    let database_url = get_env("DATABASE_URL");
    if store_backend == StoreBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' (required by the postgres backend)".to_string(),
      ));
    }

    let db_max_connections = get_env("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|| "5".to_string())
      .trim()
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;

    let ensure_schema = parse_bool("ENSURE_SCHEMA", true)?;
    let seed_db = parse_bool("SEED_DB", false)?;

    let image_dir = PathBuf::from(get_env("IMAGE_DIR").unwrap_or_else(|| "itemImage".to_string()));
    let cors_allow_origin = get_env("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "*".to_string());
    if cors_allow_origin != "*" {
      let origin = cors_allow_origin
        .parse::<Uri>()
        .map_err(|e| AppError::Config(format!("Invalid CORS_ALLOW_ORIGIN: {}", e)))?;
      if origin.scheme().is_none() || origin.host().is_none() {
        return Err(AppError::Config(format!(
          "Invalid CORS_ALLOW_ORIGIN '{}': expected '*' or an origin such as https://shop.example",
          cors_allow_origin
        )));
      }
    }

    let log_format = match get_env("LOG_FORMAT").as_deref().map(str::trim) {
      None | Some("pretty") => LogFormat::Pretty,
      Some("json") => LogFormat::Json,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'",
          other
        )))
      }
    };

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      db_max_connections,
      ensure_schema,
      seed_db,
      image_dir,
      cors_allow_origin,
      log_format,
    })
  }
}
