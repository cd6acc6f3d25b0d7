// shopfront_app/src/web/routes.rs

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, image_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Mount point of every API route.
pub const API_PREFIX: &str = "/api/v1";

/// CORS for the configured origin, `*` meaning any. Preflight requests are
/// answered by the middleware before routing.
pub fn cors(allow_origin: &str) -> Cors {
  let cors = Cors::default()
    .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
    .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
    .max_age(3600);
  if allow_origin == "*" {
    cors.allow_any_origin().send_wildcard()
  } else {
    cors.allowed_origin(allow_origin)
  }
}

// Malformed bodies and query strings get the same JSON error shape as everything else.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope(API_PREFIX)
      .app_data(json_config())
      .app_data(query_config())
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/items")
          .route("", web::get().to(product_handlers::list_items_handler))
          .route("", web::post().to(product_handlers::add_item_handler))
          .route("/{item_id}", web::get().to(product_handlers::get_item_handler)),
      )
      .route("/images/{file_name}", web::get().to(image_handlers::get_image_handler))
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::list_cart_handler))
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/{entry_id}/increment", web::patch().to(cart_handlers::increment_handler))
          .route("/{entry_id}/decrement", web::patch().to(cart_handlers::decrement_handler))
          .route("/{entry_id}", web::delete().to(cart_handlers::remove_handler)),
      ),
  );
}
