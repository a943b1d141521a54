// vitrine_project/demos/storefront_app/src/repl/browse.rs

//! Shopper-side commands: paging the feed, inspecting listings, the
//! wishlist, and ad banners.

use super::render;
use crate::errors::{AppError, Result};
use crate::state::AppState;

use vitrine::feed::{empty_state_for, BrowseFilter, LoadOutcome, SkipReason};
use vitrine::format::format_number;
use vitrine::model::category_name;
use vitrine::Product;

pub async fn browse(state: &AppState, category: Option<i64>) -> Result<()> {
  match category {
    Some(id) => {
      let name = category_name(id);
      if name.is_empty() {
        println!("Browsing category {}.", id);
      } else {
        println!("Browsing {}.", name);
      }
      state.feed.reset(BrowseFilter::category(id));
    }
    None => {
      println!("Browsing everything.");
      state.feed.reset(BrowseFilter::all());
    }
  }
  more(state).await
}

pub async fn search(state: &AppState, term: String) -> Result<()> {
  // Enter on the search box: the debouncer dispatches immediately and its
  // sink swaps the feed's filter before we pull the first page.
  state.search.input(term);
  state.search.submit();
  more(state).await
}

pub async fn more(state: &AppState) -> Result<()> {
  match state.feed.load_more().await {
    LoadOutcome::Appended { count } => {
      state.feed.with_items(|items| {
        let start = items.len() - count;
        render::product_lines(&items[start..], start);
      });
      if state.feed.exhausted() {
        println!("(end of results)");
      }
    }
    LoadOutcome::EndOfFeed { empty_feed: true } => {
      let copy = empty_state_for(&state.feed.filter());
      println!("{}", copy.title);
      println!("{}", copy.message);
    }
    LoadOutcome::EndOfFeed { empty_feed: false } => println!("(end of results)"),
    LoadOutcome::Failed { message } => println!("Could not load products: {}", message),
    LoadOutcome::Skipped(SkipReason::Exhausted) => println!("No more products. 'browse' starts over."),
    LoadOutcome::Skipped(SkipReason::Loading) => println!("Still loading, hold on."),
    LoadOutcome::Skipped(SkipReason::Disabled) => println!("The feed is switched off."),
    LoadOutcome::Stale => {}
  }
  Ok(())
}

pub fn list(state: &AppState) -> Result<()> {
  state.feed.with_items(|items| {
    if items.is_empty() {
      println!("Nothing on screen. Try 'browse' or 'search <term>'.");
    } else {
      render::product_lines(items, 0);
    }
  });
  Ok(())
}

fn item_at(state: &AppState, index: usize) -> Result<Product> {
  state
    .feed
    .with_items(|items| index.checked_sub(1).and_then(|i| items.get(i)).cloned())
    .ok_or_else(|| AppError::Usage(format!("No item {} on screen; 'list' shows what there is.", index)))
}

pub async fn open(state: &AppState, index: usize) -> Result<()> {
  let product = item_at(state, index)?;
  render::product_card(&product);

  // Warm the photo the way a detail view would.
  if product.img_path.is_some() && state.client.is_configured() {
    let url = state.client.storage().product_image_url(product.img_path.as_deref());
    if state.images.preload(&url).await {
      println!("  Photo:     cached ({})", url);
    } else {
      println!("  Photo:     not reachable ({})", url);
    }
  }

  // A few more like this one.
  let related = state
    .client
    .products()
    .browse(&BrowseFilter::related_to(product.category_id, product.id), 0, 4)
    .await?;
  if !related.is_empty() {
    println!("More like this:");
    for p in &related {
      println!("  {} (\u{20a6}{})", p.name, format_number(p.price));
    }
  }
  Ok(())
}

pub fn save(state: &AppState, index: usize) -> Result<()> {
  let product = item_at(state, index)?;
  if state.wishlist.add(&product) {
    println!("Saved {}.", product.name);
  } else {
    println!("{} is already saved.", product.name);
  }
  Ok(())
}

pub fn unsave(state: &AppState, index: usize) -> Result<()> {
  let entries = state.wishlist.items();
  let entry = index
    .checked_sub(1)
    .and_then(|i| entries.get(i))
    .ok_or_else(|| AppError::Usage(format!("No wishlist entry {}; 'wishlist' shows them.", index)))?;
  state.wishlist.remove(entry.id);
  println!("Removed {} from the wishlist.", entry.name);
  Ok(())
}

pub fn wishlist(state: &AppState) -> Result<()> {
  let entries = state.wishlist.items();
  if entries.is_empty() {
    println!("The wishlist is empty. 'save <n>' adds the n-th item on screen.");
    return Ok(());
  }
  for (i, entry) in entries.iter().enumerate() {
    println!(
      "{:>3}. {} | \u{20a6}{} | {} | {}",
      i + 1,
      entry.name,
      format_number(entry.price),
      entry.condition.label(),
      entry.location
    );
  }
  Ok(())
}

pub async fn ads(state: &AppState) -> Result<()> {
  let ads = state.client.ads().list().await?;
  if ads.is_empty() {
    println!("No banners running.");
    return Ok(());
  }
  for ad in &ads {
    let image = state.client.storage().ad_image_url(&ad.image_path);
    match &ad.link {
      Some(link) => println!("[{}] {} -> {}", ad.id, image, link),
      None => println!("[{}] {}", ad.id, image),
    }
  }
  Ok(())
}
