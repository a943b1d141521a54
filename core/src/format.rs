// vitrine_core/src/format.rs

//! Presentation helpers shared by the storefront surfaces: HTML escaping
//! for user-authored text, locale-style number grouping for prices and
//! counts, short dates, and share links for listings.

use chrono::{DateTime, Utc};

/// Escapes the five HTML-significant characters. Ampersand first, or the
/// other replacements would be double-escaped.
pub fn escape_html(input: &str) -> String {
  input
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
    .replace('\'', "&#39;")
}

/// Formats a number with thousands grouping and up to three fractional
/// digits, the way storefront prices and counts are shown: `1234567.89`
/// becomes `1,234,567.89`, `12.0` becomes `12`.
pub fn format_number(n: f64) -> String {
  if !n.is_finite() {
    return "0".to_string();
  }

  let negative = n.is_sign_negative() && n != 0.0;
  let rounded = format!("{:.3}", n.abs());
  let (int_part, frac_part) = match rounded.split_once('.') {
    Some((i, f)) => (i, f.trim_end_matches('0')),
    None => (rounded.as_str(), ""),
  };

  let digits: Vec<char> = int_part.chars().collect();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.iter().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(*c);
  }

  let mut out = String::new();
  if negative {
    out.push('-');
  }
  out.push_str(&grouped);
  if !frac_part.is_empty() {
    out.push('.');
    out.push_str(frac_part);
  }
  out
}

/// Short date for listing metadata, e.g. `23 Aug 2026`. Missing dates read
/// as `Unknown`.
pub fn format_date(date: Option<&DateTime<Utc>>) -> String {
  match date {
    Some(d) => d.format("%-d %b %Y").to_string(),
    None => "Unknown".to_string(),
  }
}

/// A shareable deep link and blurb for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareContent {
  pub url: String,
  pub title: String,
  pub text: String,
}

/// Builds the share payload for a listing: `origin` is the storefront's
/// public origin, `site_name` its display brand.
pub fn share_content(origin: &str, site_name: &str, product_id: i64, name: &str, price: f64) -> ShareContent {
  let origin = origin.trim_end_matches('/');
  ShareContent {
    url: format!("{}/product-detail?id={}", origin, product_id),
    title: format!("{} on {}", name, site_name),
    text: format!("Check out {} for ₦{} on {}!", name, format_number(price), site_name),
  }
}
