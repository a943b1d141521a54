// vitrine_core/src/client/storage.rs

//! Object storage: public URL resolution (cached) and image upload/removal
//! with the validation rules the listing forms rely on.

use chrono::Utc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

use crate::client::StoreClient;
use crate::error::{Result, StoreError};

pub const PRODUCTS_BUCKET: &str = "products";
pub const ADS_BUCKET: &str = "ads";
pub const PROFILES_BUCKET: &str = "profiles";

/// Shown wherever a listing has no stored image, and by inert clients for
/// every path.
pub const PLACEHOLDER_IMAGE: &str = "/assets/emptypics.png";
/// Shown for sellers without a profile picture.
pub const FALLBACK_PROFILE_IMAGE: &str = "/assets/profilepics.png";

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const VALID_TYPES: [&str; 5] = ["image/jpeg", "image/jpg", "image/png", "image/webp", "image/gif"];

/// Where an uploaded object ended up: the bucket-relative path stored on the
/// row, and the public URL for immediate display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
  pub path: String,
  pub url: String,
}

/// Object storage surface of the client.
pub struct Storage<'a> {
  pub(crate) client: &'a StoreClient,
}

impl Storage<'_> {
  /// Public URL for an object. Resolutions are memoized per (bucket, path)
  /// for the life of the client; an empty path resolves to an empty URL.
  pub fn public_url(&self, bucket: &str, path: &str) -> String {
    if path.is_empty() {
      return String::new();
    }
    let Some(transport) = self.client.transport() else {
      return PLACEHOLDER_IMAGE.to_string();
    };

    let key = format!("{}/{}", bucket, path);
    if let Some(hit) = self.client.url_cache.lock().get(&key) {
      return hit.clone();
    }
    let url = transport.public_object_url(bucket, path);
    self.client.url_cache.lock().insert(key, url.clone());
    url
  }

  /// URL for a listing image; missing paths fall back to the placeholder.
  pub fn product_image_url(&self, img_path: Option<&str>) -> String {
    match img_path {
      Some(path) if !path.is_empty() => self.public_url(PRODUCTS_BUCKET, path),
      _ => PLACEHOLDER_IMAGE.to_string(),
    }
  }

  pub fn ad_image_url(&self, image_path: &str) -> String {
    self.public_url(ADS_BUCKET, image_path)
  }

  /// URL for a seller's profile picture; missing paths fall back to the
  /// stock avatar.
  pub fn seller_profile_url(&self, img_path: Option<&str>) -> String {
    match img_path {
      Some(path) if !path.is_empty() => self.public_url(PROFILES_BUCKET, path),
      _ => FALLBACK_PROFILE_IMAGE.to_string(),
    }
  }

  pub fn clear_url_cache(&self) {
    self.client.url_cache.lock().clear();
  }

  /// Uploads an image into `bucket`, optionally under `folder`, and returns
  /// its stored path and public URL.
  ///
  /// The object name is generated (timestamp plus random suffix, original
  /// extension kept) so repeated uploads of the same file never collide.
  #[instrument(name = "Storage::upload_image", skip_all, fields(bucket = %bucket), err(Display))]
  pub async fn upload_image(
    &self,
    bucket: &str,
    folder: &str,
    original_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
  ) -> Result<StoredObject> {
    let transport = self.client.transport_or_err("upload an image")?;

    if bytes.is_empty() {
      return Err(StoreError::Storage {
        message: "No file provided".into(),
      });
    }
    if !VALID_TYPES.contains(&content_type) {
      return Err(StoreError::Storage {
        message: "Invalid file type. Please upload a JPEG, PNG, WebP, or GIF image.".into(),
      });
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
      return Err(StoreError::Storage {
        message: "File size too large. Maximum size is 5MB.".into(),
      });
    }

    let file_name = unique_object_name(original_name);
    let path = if folder.is_empty() {
      file_name
    } else {
      format!("{}/{}", folder, file_name)
    };

    transport.storage_upload(bucket, &path, content_type, bytes).await?;
    let url = self.public_url(bucket, &path);
    event!(Level::DEBUG, path = %path, "Image uploaded.");
    Ok(StoredObject { path, url })
  }

  /// Uploads a listing image into the products bucket.
  pub async fn upload_product_image(
    &self,
    original_name: &str,
    content_type: &str,
    bytes: Vec<u8>,
  ) -> Result<StoredObject> {
    self
      .upload_image(PRODUCTS_BUCKET, "", original_name, content_type, bytes)
      .await
  }

  /// Removes one object from a bucket.
  #[instrument(name = "Storage::remove_image", skip_all, fields(bucket = %bucket, path = %path), err(Display))]
  pub async fn remove_image(&self, bucket: &str, path: &str) -> Result<()> {
    if path.is_empty() {
      return Err(StoreError::Storage {
        message: "No path provided".into(),
      });
    }
    let transport = self.client.transport_or_err("remove an image")?;
    transport.storage_remove(bucket, &[path]).await
  }

  pub async fn remove_product_image(&self, path: &str) -> Result<()> {
    self.remove_image(PRODUCTS_BUCKET, path).await
  }
}

/// Collision-resistant object name: millisecond timestamp, short random
/// suffix, original extension (defaulting to the whole name when it has
/// no dot).
pub fn unique_object_name(original_name: &str) -> String {
  let ext = original_name.rsplit('.').next().unwrap_or("bin");
  let suffix: String = Uuid::new_v4().simple().to_string().chars().take(7).collect();
  format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, ext)
}
