// vitrine_core/src/model/ad.rs

use serde::{Deserialize, Serialize};

/// A promotional banner row. `image_path` is an object path inside the ads
/// bucket, not a full URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
  pub id: i64,
  pub image_path: String,
  #[serde(default)]
  pub link: Option<String>,
}
