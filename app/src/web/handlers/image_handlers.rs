// shopfront_app/src/web/handlers/image_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

fn content_type_for(file_name: &str) -> &'static str {
  let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
  match extension.as_deref() {
    Some("png") => "image/png",
    Some("jpg") | Some("jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    Some("webp") => "image/webp",
    Some("svg") => "image/svg+xml",
    _ => "application/octet-stream",
  }
}

#[instrument(name = "handler::get_image", skip(app_state))]
pub async fn get_image_handler(app_state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
  let file_name = path.into_inner();
  match app_state.images.read(&file_name).await? {
    Some(bytes) => Ok(HttpResponse::Ok().content_type(content_type_for(&file_name)).body(bytes)),
    None => Err(AppError::NotFound(format!("Image {} not found.", file_name))),
  }
}
