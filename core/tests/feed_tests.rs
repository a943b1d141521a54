// tests/feed_tests.rs
mod common; // Reference the common module

use std::sync::Arc;

use common::*;
use serial_test::serial;
use vitrine::feed::{
  empty_state_for, BrowseFilter, Feed, FeedOptions, LoadOutcome, PageSource, SkipReason, DEFAULT_PAGE_SIZE,
};

#[tokio::test]
async fn test_feed_appends_pages_newest_first() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(catalog(30)));
  let feed = Feed::new(Arc::clone(&source) as Arc<dyn PageSource>);

  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 12 });
  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 12 });
  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 6 });

  assert_eq!(feed.len(), 30);
  assert_eq!(feed.offset(), 30);
  assert!(feed.exhausted()); // Last page came up short
  let items = feed.items();
  assert_eq!(items[0].id, 30);
  assert_eq!(items[11].id, 19);
  assert_eq!(items[29].id, 1);
}

#[tokio::test]
async fn test_feed_trigger_after_exhaustion_is_skipped() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(catalog(5)));
  let feed = Feed::new(Arc::clone(&source) as Arc<dyn PageSource>);

  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 5 });
  assert!(feed.exhausted());
  assert_eq!(feed.load_more().await, LoadOutcome::Skipped(SkipReason::Exhausted));
  assert_eq!(source.calls().len(), 1); // The skip never reached the source
}

#[tokio::test]
async fn test_feed_empty_catalog_reports_empty_feed() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(Vec::new()));
  let feed = Feed::new(Arc::clone(&source) as Arc<dyn PageSource>);

  assert_eq!(feed.load_more().await, LoadOutcome::EndOfFeed { empty_feed: true });
  assert!(feed.is_empty());
  assert!(feed.exhausted());
}

#[tokio::test]
async fn test_feed_exact_page_boundary_ends_on_empty_probe() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(catalog(DEFAULT_PAGE_SIZE)));
  let feed = Feed::new(Arc::clone(&source) as Arc<dyn PageSource>);

  // A full page proves nothing about the end; only the empty follow-up does.
  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 12 });
  assert!(!feed.exhausted());
  assert_eq!(feed.load_more().await, LoadOutcome::EndOfFeed { empty_feed: false });
  assert!(feed.exhausted());
  assert_eq!(feed.len(), 12);
}

#[tokio::test]
async fn test_feed_fetch_error_leaves_feed_open_for_retry() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(catalog(30)));
  let feed = Feed::new(Arc::clone(&source) as Arc<dyn PageSource>);

  source.fail_next();
  match feed.load_more().await {
    LoadOutcome::Failed { message } => assert!(message.contains("scripted page failure")),
    other => panic!("Expected LoadOutcome::Failed, got {:?}", other),
  }
  assert!(!feed.exhausted()); // An error is not the end of the feed
  assert!(!feed.loading());
  assert_eq!(feed.len(), 0);

  // The next trigger retries the same window and succeeds.
  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 12 });
  let calls = source.calls();
  assert_eq!(calls.len(), 2);
  assert_eq!(calls[0].offset, 0);
  assert_eq!(calls[1].offset, 0);
}

#[tokio::test]
#[serial]
async fn test_feed_second_trigger_skips_while_fetch_in_flight() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(catalog(30)));
  let gate = source.hold_next();
  let feed = Arc::new(Feed::new(Arc::clone(&source) as Arc<dyn PageSource>));

  let racer = {
    let feed = Arc::clone(&feed);
    tokio::spawn(async move { feed.load_more().await })
  };
  while source.calls().is_empty() {
    tokio::task::yield_now().await;
  }

  assert!(feed.loading());
  assert_eq!(feed.load_more().await, LoadOutcome::Skipped(SkipReason::Loading));

  gate.notify_one();
  assert_eq!(racer.await.unwrap(), LoadOutcome::Appended { count: 12 });
  assert_eq!(feed.len(), 12);
  assert_eq!(source.calls().len(), 1); // The skipped trigger never fetched
}

#[tokio::test]
#[serial]
async fn test_feed_reset_discards_in_flight_page() {
  setup_tracing();
  let mut rows = catalog(20);
  rows.extend((21..=25).map(|id| product_in_category(id, 2)));
  let source = Arc::new(ScriptedSource::new(rows));
  let gate = source.hold_next();
  let feed = Arc::new(Feed::new(Arc::clone(&source) as Arc<dyn PageSource>));

  let racer = {
    let feed = Arc::clone(&feed);
    tokio::spawn(async move { feed.load_more().await })
  };
  while source.calls().is_empty() {
    tokio::task::yield_now().await;
  }

  feed.reset(BrowseFilter::category(2));
  assert!(!feed.loading()); // Reset put the state machine back to idle

  gate.notify_one();
  assert_eq!(racer.await.unwrap(), LoadOutcome::Stale);
  assert_eq!(feed.len(), 0); // Nothing from the old filter leaked in
  assert_eq!(feed.offset(), 0);

  // The new filter loads normally afterwards.
  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 5 });
  assert!(feed.items().iter().all(|p| p.category_id == 2));
  assert!(feed.exhausted());
}

#[tokio::test]
async fn test_feed_reset_switches_filter_and_clears_items() {
  setup_tracing();
  let mut rows = catalog(15);
  rows.extend((16..=18).map(|id| product_in_category(id, 3)));
  let source = Arc::new(ScriptedSource::new(rows));
  let feed = Feed::new(Arc::clone(&source) as Arc<dyn PageSource>);

  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 12 });
  feed.reset(BrowseFilter::category(3));
  assert!(feed.is_empty());
  assert_eq!(feed.filter(), BrowseFilter::category(3));

  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 3 });
  let items = feed.items();
  assert_eq!(items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![18, 17, 16]);
}

#[tokio::test]
async fn test_feed_search_matches_name_and_description() {
  setup_tracing();
  let mut rows = catalog(5);
  rows[0].name = "Blue Kettle".to_string(); // id 1
  rows[2].name = "Red Kettle".to_string(); // id 3
  rows[4].description = Some("Vintage kettle, barely used".to_string()); // id 5
  let source = Arc::new(ScriptedSource::new(rows));
  let feed = Feed::new(Arc::clone(&source) as Arc<dyn PageSource>);

  feed.reset(BrowseFilter::search("kettle"));
  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 3 });
  assert_eq!(
    feed.with_items(|items| items.iter().map(|p| p.id).collect::<Vec<_>>()),
    vec![5, 3, 1]
  );
}

#[tokio::test]
async fn test_feed_disabled_skips_until_enabled() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(catalog(6)));
  let feed = Feed::with_options(
    Arc::clone(&source) as Arc<dyn PageSource>,
    BrowseFilter::all(),
    FeedOptions {
      page_size: 12,
      enabled: false,
    },
  );

  assert_eq!(feed.load_more().await, LoadOutcome::Skipped(SkipReason::Disabled));
  assert!(source.calls().is_empty());

  feed.set_enabled(true);
  assert_eq!(feed.load_more().await, LoadOutcome::Appended { count: 6 });
}

#[tokio::test]
async fn test_feed_passes_filter_and_row_window_to_source() {
  setup_tracing();
  let source = Arc::new(ScriptedSource::new(catalog(30)));
  let feed = Feed::with_options(
    Arc::clone(&source) as Arc<dyn PageSource>,
    BrowseFilter::category(1),
    FeedOptions {
      page_size: 5,
      enabled: true,
    },
  );

  feed.load_more().await;
  feed.load_more().await;

  let calls = source.calls();
  assert_eq!(calls.len(), 2);
  assert_eq!(calls[0].filter, BrowseFilter::category(1));
  assert_eq!((calls[0].offset, calls[0].limit), (0, 5));
  assert_eq!((calls[1].offset, calls[1].limit), (5, 5));
}

#[tokio::test]
async fn test_empty_state_copy_follows_active_filter() {
  setup_tracing();

  let plain = empty_state_for(&BrowseFilter::all());
  assert_eq!(plain.title, "No products available");
  assert_eq!(plain.message, "Stay tuned for exciting products coming soon!");

  let searched = empty_state_for(&BrowseFilter::search("vintage kettle"));
  assert_eq!(searched.title, "No results for your search");
  assert_eq!(
    searched.message,
    "No products match \"vintage kettle\". Try different keywords."
  );

  let category = empty_state_for(&BrowseFilter::category(3));
  assert_eq!(category.title, "No products in Home & Kitchen");
  assert_eq!(category.message, "This category is empty. Check back later for new listings.");

  // A search that is only whitespace falls through to the category copy.
  let mut filter = BrowseFilter::category(9);
  filter.search = Some("   ".to_string());
  assert_eq!(empty_state_for(&filter).title, "No products in Groceries");
}
