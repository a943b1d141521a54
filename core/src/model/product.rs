// vitrine_core/src/model/product.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::model::category;

/// Physical condition of a listed item. Stored on the wire as the exact
/// human-readable label, so the serde renames are load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
  #[serde(rename = "Brand New")]
  BrandNew,
  #[serde(rename = "Used - Excellent")]
  UsedExcellent,
  #[serde(rename = "Used - Good")]
  UsedGood,
  #[serde(rename = "Used - Fair")]
  UsedFair,
  #[serde(rename = "Refurbished")]
  Refurbished,
}

impl Condition {
  pub const ALL: [Condition; 5] = [
    Condition::BrandNew,
    Condition::UsedExcellent,
    Condition::UsedGood,
    Condition::UsedFair,
    Condition::Refurbished,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Condition::BrandNew => "Brand New",
      Condition::UsedExcellent => "Used - Excellent",
      Condition::UsedGood => "Used - Good",
      Condition::UsedFair => "Used - Fair",
      Condition::Refurbished => "Refurbished",
    }
  }
}

impl Default for Condition {
  fn default() -> Self {
    Condition::BrandNew
  }
}

impl fmt::Display for Condition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

impl FromStr for Condition {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Condition::ALL
      .iter()
      .copied()
      .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| format!("Unknown condition '{}'", s))
  }
}

/// A live listing as returned by the catalog.
///
/// Browse queries select a trimmed column set (no seller columns, no
/// timestamp), so those fields are optional and only populated when a full
/// row was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: i64,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub price: f64,
  pub category_id: i64,
  pub condition: Condition,
  pub location: String,
  #[serde(default)]
  pub img_path: Option<String>,
  #[serde(default)]
  pub seller_id: Option<Uuid>,
  #[serde(default)]
  pub seller_name: Option<String>,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

impl Product {
  pub fn category_name(&self) -> &'static str {
    category::category_name(self.category_id)
  }
}

/// A seller's submission for a new listing. `seller_id` is not part of the
/// form; the client stamps it from the signed-in session on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
  pub name: String,
  pub description: Option<String>,
  pub price: f64,
  pub category_id: i64,
  pub condition: Condition,
  pub location: String,
  pub seller_name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub img_path: Option<String>,
}

impl NewProduct {
  /// Checks every field and reports all rejections at once, so a form can
  /// highlight each offending input in a single pass.
  pub fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if self.name.trim().is_empty() {
      errors.push("name", "Product name is required");
    }
    if !(self.price.is_finite() && self.price > 0.0) {
      errors.push("price", "Valid price is required");
    }
    if category::category_name(self.category_id).is_empty() {
      errors.push("category_id", "Category is required");
    }
    if self.location.trim().is_empty() {
      errors.push("location", "Location is required");
    }
    if self.seller_name.trim().is_empty() {
      errors.push("seller_name", "Seller name is required");
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors)
    }
  }

  /// Canonical row values: trimmed text fields, blank description collapsed
  /// to NULL.
  pub(crate) fn normalized(&self) -> NewProduct {
    let description = self
      .description
      .as_deref()
      .map(str::trim)
      .filter(|d| !d.is_empty())
      .map(str::to_string);

    NewProduct {
      name: self.name.trim().to_string(),
      description,
      price: self.price,
      category_id: self.category_id,
      condition: self.condition,
      location: self.location.trim().to_string(),
      seller_name: self.seller_name.trim().to_string(),
      img_path: self.img_path.clone(),
    }
  }
}

/// The subset of a listing the wishlist persists locally. Enough to render
/// a card and link back to the listing without another fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
  pub id: i64,
  pub name: String,
  pub price: f64,
  pub category_id: i64,
  pub condition: Condition,
  pub location: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub img_path: Option<String>,
}

impl From<&Product> for WishlistEntry {
  fn from(p: &Product) -> Self {
    WishlistEntry {
      id: p.id,
      name: p.name.clone(),
      price: p.price,
      category_id: p.category_id,
      condition: p.condition,
      location: p.location.clone(),
      description: p.description.clone(),
      img_path: p.img_path.clone(),
    }
  }
}

/// Compact row for a seller's dashboard list, fetched with a narrow column
/// selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductSummary {
  pub id: i64,
  pub name: String,
  pub price: f64,
  pub category_id: i64,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate numbers for a seller's dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
  pub total_products: u64,
  pub total_categories: usize,
  pub recent: Vec<ProductSummary>,
}
