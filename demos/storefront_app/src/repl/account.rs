// vitrine_project/demos/storefront_app/src/repl/account.rs

//! Seller-side commands: session management, the dashboard, and listing
//! lifecycle.

use crate::errors::{AppError, Result};
use crate::state::AppState;

use vitrine::format::{format_date, format_number};
use vitrine::model::{category_name, Condition};
use vitrine::NewProduct;

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<()> {
  let session = state.client.auth().sign_in(email, password).await?;
  println!("Signed in as {}.", session.email.as_deref().unwrap_or(email));
  Ok(())
}

pub async fn logout(state: &AppState) -> Result<()> {
  state.client.auth().sign_out().await?;
  println!("Signed out.");
  Ok(())
}

pub fn whoami(state: &AppState) -> Result<()> {
  match state.client.auth().session() {
    Some(session) => {
      println!("{}", session.email.as_deref().unwrap_or("(no email on session)"));
      println!("  User id: {}", session.user_id);
      println!("  Expires: {}", session.expires_at.to_rfc3339());
    }
    None => println!("Not signed in. 'login <email> <password>' to sign in."),
  }
  Ok(())
}

pub async fn mine(state: &AppState) -> Result<()> {
  let listings = state.client.products().mine().await?;
  if listings.is_empty() {
    println!("You have no listings. 'sell' publishes one.");
    return Ok(());
  }
  for p in &listings {
    println!(
      "[{}] {} | \u{20a6}{} | {}",
      p.id,
      p.name,
      format_number(p.price),
      p.condition.label()
    );
  }
  Ok(())
}

pub async fn stats(state: &AppState) -> Result<()> {
  let stats = state.client.products().seller_stats().await?;
  println!(
    "{} listings across {} categories.",
    stats.total_products, stats.total_categories
  );
  if !stats.recent.is_empty() {
    println!("Most recent:");
    for p in &stats.recent {
      println!(
        "  [{}] {} | \u{20a6}{} | {}",
        p.id,
        p.name,
        format_number(p.price),
        format_date(p.created_at.as_ref())
      );
    }
  }
  Ok(())
}

const SELL_USAGE: &str =
  "Usage: sell <name> | <price> | <category-id> | <condition> | <location> | <seller name> [| <description>]";

pub async fn sell(state: &AppState, spec: &str) -> Result<()> {
  let fields: Vec<&str> = spec.split('|').map(str::trim).collect();
  if fields.len() < 6 {
    return Err(AppError::Usage(SELL_USAGE.to_string()));
  }

  // Unparseable numbers fall through to the listing validation, which
  // reports them alongside any other rejected fields.
  let price = fields[1].parse::<f64>().unwrap_or(-1.0);
  let category_id = fields[2].parse::<i64>().unwrap_or(0);
  let condition = fields[3].parse::<Condition>().map_err(AppError::Usage)?;

  let listing = NewProduct {
    name: fields[0].to_string(),
    description: fields.get(6).map(|d| d.to_string()),
    price,
    category_id,
    condition,
    location: fields[4].to_string(),
    seller_name: fields[5].to_string(),
    img_path: None,
  };

  let created = state.client.products().create(&listing).await?;
  println!(
    "Published {} as listing {} in {}.",
    created.name,
    created.id,
    category_name(created.category_id)
  );
  Ok(())
}

pub async fn unlist(state: &AppState, id: i64) -> Result<()> {
  state.client.products().delete(id).await?;
  println!("Removed listing {}.", id);
  Ok(())
}
