// shopfront_app/src/services/image_storage.rs

//! Stores uploaded product photos on the local filesystem.

use async_trait::async_trait;
use chrono::Utc;
use shopfront::{ImageStore, ImageUpload, ShopError, ShopResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Public path under which stored files are served back, matching the
/// `/images/{file_name}` route in the API scope.
pub const IMAGE_ROUTE_PREFIX: &str = "/api/v1/images/";

const FALLBACK_NAME: &str = "upload";

/// Reduces a client-supplied file name to a safe single path component.
///
/// Directory parts are dropped and anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_file_name(original: &str) -> String {
  let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
  let cleaned: String = base
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
    .collect();
  let cleaned = cleaned.trim_start_matches('.');
  if cleaned.is_empty() {
    FALLBACK_NAME.to_string()
  } else {
    cleaned.to_string()
  }
}

#[derive(Debug, Clone)]
pub struct LocalImageStore {
  dir: PathBuf,
}

impl LocalImageStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  /// Maps a served file name back onto the image directory. `None` for
  /// anything that is not a plain file name produced by [`sanitize_file_name`].
  pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
    if file_name.is_empty() || sanitize_file_name(file_name) != file_name {
      return None;
    }
    Some(self.dir.join(file_name))
  }

  /// Reads a previously stored image.
  pub async fn read(&self, file_name: &str) -> std::io::Result<Option<Vec<u8>>> {
    let Some(path) = self.resolve(file_name) else {
      return Ok(None);
    };
    match fs::read(&path).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }
}

#[async_trait]
impl ImageStore for LocalImageStore {
  #[instrument(name = "LocalImageStore::store", skip(self, upload), fields(original_name = %upload.original_name, size = upload.bytes.len()), err(Display))]
  async fn store(&self, upload: ImageUpload) -> ShopResult<String> {
    fs::create_dir_all(&self.dir).await.map_err(ShopError::store)?;
    let sanitized = sanitize_file_name(&upload.original_name);

    // Two uploads of the same name within one millisecond would collide;
    // `create_new` detects it and the timestamp is bumped.
    let mut stamp = Utc::now().timestamp_millis();
    loop {
      let file_name = format!("{}-{}", stamp, sanitized);
      let path = self.dir.join(&file_name);
      match fs::OpenOptions::new().write(true).create_new(true).open(&path).await {
        Ok(mut file) => {
          file.write_all(&upload.bytes).await.map_err(ShopError::store)?;
          file.flush().await.map_err(ShopError::store)?;
          debug!(path = %path.display(), "Image written.");
          return Ok(format!("{}{}", IMAGE_ROUTE_PREFIX, file_name));
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
        Err(e) => return Err(ShopError::store(e)),
      }
    }
  }
}
