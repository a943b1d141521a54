// vitrine_core/examples/feed_walkthrough.rs

use std::sync::Arc;

use tracing::info;
use vitrine::feed::{empty_state_for, BrowseFilter, Feed, FnPageSource, LoadOutcome, PageSource};
use vitrine::format::format_number;
use vitrine::model::Condition;
use vitrine::{Product, StoreError};

// 1. Build a small in-memory catalog to page over.
fn demo_product(id: i64, category_id: i64) -> Product {
  Product {
    id,
    name: format!("Listing {}", id),
    description: Some("A perfectly serviceable demo item".to_string()),
    price: 2_500.0 + id as f64 * 10.0,
    category_id,
    condition: Condition::BrandNew,
    location: "Lagos".to_string(),
    img_path: Some(format!("listing-{}.jpg", id)),
    seller_id: None,
    seller_name: None,
    created_at: None,
  }
}

#[tokio::main]
async fn main() -> Result<(), StoreError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Feed Walkthrough Example ---");

  // 30 listings; every third one is Fashion, the rest Electronics.
  let catalog: Arc<Vec<Product>> = Arc::new(
    (1..=30)
      .map(|id| demo_product(id, if id % 3 == 0 { 2 } else { 1 }))
      .collect(),
  );

  // 2. Wrap the catalog in a page source. A live app hands the feed a
  //    CatalogSource over a StoreClient instead; the contract is the same.
  let source: Arc<dyn PageSource> = Arc::new(FnPageSource::new(move |filter, offset, limit| {
    let catalog = Arc::clone(&catalog);
    async move {
      let mut rows: Vec<Product> = catalog
        .iter()
        .filter(|p| filter.category_id.map_or(true, |c| p.category_id == c))
        .cloned()
        .collect();
      rows.sort_by(|a, b| b.id.cmp(&a.id)); // newest first, like the backend
      Ok::<Vec<Product>, StoreError>(rows.into_iter().skip(offset).take(limit).collect())
    }
  }));

  // 3. Create the feed and pull the first page.
  let feed = Feed::new(Arc::clone(&source));
  let outcome = feed.load_more().await;
  info!("First trigger: {:?}", outcome);
  assert!(matches!(outcome, LoadOutcome::Appended { count: 12 }));
  feed.with_items(|items| {
    let top = &items[0];
    info!("Top of feed: {} at \u{20a6}{}", top.name, format_number(top.price));
    assert_eq!(top.id, 30); // Newest listing leads
  });

  // 4. Keep triggering until the source is drained.
  while !feed.exhausted() {
    let outcome = feed.load_more().await;
    info!("Next trigger: {:?}", outcome);
  }
  assert_eq!(feed.len(), 30);

  // 5. A trigger after exhaustion is skipped without touching the source.
  let outcome = feed.load_more().await;
  info!("Post-exhaustion trigger: {:?}", outcome);
  assert!(matches!(outcome, LoadOutcome::Skipped(_)));

  // 6. Reset to a category; items restart from offset zero under the new filter.
  feed.reset(BrowseFilter::category(2));
  assert!(feed.is_empty());
  feed.load_more().await;
  info!("Fashion holds {} listings.", feed.len());
  assert_eq!(feed.len(), 10);
  feed.with_items(|items| {
    assert!(items.iter().all(|p| p.category_id == 2));
  });

  // 7. Empty-state copy follows the active filter.
  feed.reset(BrowseFilter::category(5));
  let outcome = feed.load_more().await;
  assert_eq!(outcome, LoadOutcome::EndOfFeed { empty_feed: true });
  let copy = empty_state_for(&feed.filter());
  info!("Empty state: {} / {}", copy.title, copy.message);
  assert_eq!(copy.title, "No products in Sports & Outdoors");

  Ok(())
}
