// vitrine_project/demos/storefront_app/src/repl/render.rs

//! Plain-text rendering for listings, shared by the browse and account
//! commands.

use vitrine::format::{format_date, format_number, share_content};
use vitrine::model::{category_name, CATEGORIES};
use vitrine::Product;

const SITE_NAME: &str = "Vitrine Demo Market";
const SITE_ORIGIN: &str = "https://market.example.com";

pub fn product_lines(products: &[Product], numbered_from: usize) {
  for (i, p) in products.iter().enumerate() {
    println!(
      "{:>3}. {} | \u{20a6}{} | {} | {}",
      numbered_from + i + 1,
      p.name,
      format_number(p.price),
      p.condition.label(),
      p.location
    );
  }
}

pub fn product_card(product: &Product) {
  println!("{}", product.name);
  println!("  Price:     \u{20a6}{}", format_number(product.price));
  println!("  Condition: {}", product.condition.label());
  println!("  Category:  {}", category_name(product.category_id));
  println!("  Location:  {}", product.location);
  println!("  Listed:    {}", format_date(product.created_at.as_ref()));
  if let Some(seller) = product.seller_name.as_deref() {
    println!("  Seller:    {}", seller);
  }
  if let Some(description) = product.description.as_deref() {
    println!("  {}", description);
  }
  let share = share_content(SITE_ORIGIN, SITE_NAME, product.id, &product.name, product.price);
  println!("  Share:     {}", share.text);
  println!("             {}", share.url);
}

pub fn categories() {
  for category in CATEGORIES.iter() {
    println!("{:>3}. {} ({})", category.id, category.name, category.icon);
  }
}
