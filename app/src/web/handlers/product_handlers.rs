// shopfront_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use shopfront::{CatalogQuery, ImageUpload, NewProduct};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// An image attached to a product, base64-encoded. A `data:` URL prefix is accepted.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
  pub file_name: String,
  pub data: String,
}

impl ImagePayload {
  fn decode(self) -> Result<ImageUpload, AppError> {
    let encoded = match self.data.split_once(',') {
      Some((prefix, rest)) if prefix.starts_with("data:") => rest,
      _ => self.data.as_str(),
    };
    let bytes = STANDARD
      .decode(encoded.trim())
      .map_err(|e| AppError::Validation(format!("Image data is not valid base64: {}", e)))?;
    if bytes.is_empty() {
      return Err(AppError::Validation("Image data is empty.".to_string()));
    }
    Ok(ImageUpload {
      original_name: self.file_name,
      bytes,
    })
  }
}

#[derive(Deserialize, Debug)]
pub struct AddItemRequestPayload {
  #[serde(flatten)]
  pub product: NewProduct,
  pub image: Option<ImagePayload>,
}

// Repeated keys (`category=a&category=b`) are kept, so the query is read as raw pairs.
#[instrument(name = "handler::list_items", skip(app_state, query_params))]
pub async fn list_items_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
  let query = CatalogQuery::from_pairs(query_params.into_inner());
  let items = app_state.catalog.query(query).await?;
  info!("Catalog query returned {} items.", items.len());
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(name = "handler::get_item", skip(app_state, path), fields(item_id = %path.as_ref()))]
pub async fn get_item_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let item = app_state.catalog.find_item(&path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::add_item", skip(app_state, req_payload))]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddItemRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let AddItemRequestPayload { product, image } = req_payload.into_inner();
  let upload = image.map(ImagePayload::decode).transpose()?;

  let item = app_state.catalog.add_item(product, upload).await?;
  info!(item_id = %item.id, product_name = %item.product_name, "Product added to catalog.");
  Ok(HttpResponse::Created().json(item))
}
