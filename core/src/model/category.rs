// vitrine_core/src/model/category.rs

/// One entry of the fixed category catalog. The catalog ships with the
/// client; it is not fetched from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
  pub id: i64,
  pub name: &'static str,
  pub icon: &'static str,
}

pub const CATEGORIES: [Category; 10] = [
  Category { id: 1, name: "Electronics", icon: "tv" },
  Category { id: 2, name: "Fashion", icon: "person" },
  Category { id: 3, name: "Home & Kitchen", icon: "house" },
  Category { id: 4, name: "Beauty & Health", icon: "heart" },
  Category { id: 5, name: "Sports & Outdoors", icon: "basket" },
  Category { id: 6, name: "Books & Stationery", icon: "book" },
  Category { id: 7, name: "Automotive", icon: "car-front" },
  Category { id: 8, name: "Toys & Baby", icon: "puzzle" },
  Category { id: 9, name: "Groceries", icon: "basket2" },
  Category { id: 10, name: "Electronics Accessories", icon: "plug" },
];

/// Display name for a category id, or `""` for ids outside the catalog.
pub fn category_name(category_id: i64) -> &'static str {
  CATEGORIES
    .iter()
    .find(|c| c.id == category_id)
    .map(|c| c.name)
    .unwrap_or("")
}

/// Icon name for a category id, or `""` for ids outside the catalog.
pub fn category_icon(category_id: i64) -> &'static str {
  CATEGORIES
    .iter()
    .find(|c| c.id == category_id)
    .map(|c| c.icon)
    .unwrap_or("")
}

/// Parses a category selector as it appears in a navigation parameter.
///
/// `"all"` (any case) and anything non-numeric select the whole catalog and
/// map to `None`; a numeric id filters to that category. Unknown numeric ids
/// are passed through unchanged, the backend simply matches no rows.
pub fn parse_category_param(raw: &str) -> Option<i64> {
  let raw = raw.trim();
  if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
    return None;
  }
  match raw.parse::<i64>() {
    Ok(id) => Some(id),
    Err(_) => {
      tracing::debug!(param = %raw, "Ignoring non-numeric category selector.");
      None
    }
  }
}
