// shopfront_app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use shopfront::{AddToCart, CartChange, CartUpsert};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_cart", skip(app_state))]
pub async fn list_cart_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let entries = app_state.cart.list().await?;
  Ok(HttpResponse::Ok().json(entries))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload),
    fields(item_id = ?req_payload.item_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCart>,
) -> Result<HttpResponse, AppError> {
  let outcome = app_state.cart.add_or_merge(req_payload.into_inner()).await?;
  info!(
    "Cart entry {} {} with quantity {}.",
    outcome.entry().id,
    outcome.status(),
    outcome.entry().quantity
  );

  let (mut response, message) = match &outcome {
    CartUpsert::Created(_) => (HttpResponse::Created(), "Item added to cart."),
    CartUpsert::Updated(_) => (HttpResponse::Ok(), "Cart item quantity updated."),
  };
  Ok(response.json(json!({
      "message": message,
      "status": outcome.status(),
      "cartEntry": outcome.entry()
  })))
}

#[instrument(name = "handler::increment_cart_entry", skip(app_state, path), fields(entry_id = %path.as_ref()))]
pub async fn increment_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let entry = app_state.cart.increment(&path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Cart item quantity increased.",
      "cartEntry": entry
  })))
}

#[instrument(name = "handler::decrement_cart_entry", skip(app_state, path), fields(entry_id = %path.as_ref()))]
pub async fn decrement_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  match app_state.cart.decrement(&path.into_inner()).await? {
    CartChange::Updated(entry) => Ok(HttpResponse::Ok().json(json!({
        "message": "Cart item quantity decreased.",
        "cartEntry": entry
    }))),
    CartChange::Removed(entry) => Ok(HttpResponse::Ok().json(json!({
        "message": "Item removed from cart.",
        "removed": true,
        "cartEntry": entry
    }))),
  }
}

#[instrument(name = "handler::remove_cart_entry", skip(app_state, path), fields(entry_id = %path.as_ref()))]
pub async fn remove_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let entry = app_state.cart.remove(&path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Item removed from cart.",
      "cartEntry": entry
  })))
}
