// vitrine_core/src/feed/controller.rs

//! The paging state machine behind an infinite product feed.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{event, instrument, Level};

use crate::client::products::BrowseFilter;
use crate::feed::source::PageSource;
use crate::model::category;
use crate::model::Product;

/// Pages are this size unless configured otherwise; a shorter page is the
/// end of the feed.
pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone)]
pub struct FeedOptions {
  pub page_size: usize,
  /// A disabled feed ignores triggers entirely, e.g. while an empty-state
  /// panel is covering the grid.
  pub enabled: bool,
}

impl Default for FeedOptions {
  fn default() -> Self {
    FeedOptions {
      page_size: DEFAULT_PAGE_SIZE,
      enabled: true,
    }
  }
}

/// Why a trigger did not start a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  Loading,
  Exhausted,
  Disabled,
}

/// What one trigger accomplished.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
  /// A page arrived and was appended. The feed may still have become
  /// exhausted if the page came up short.
  Appended { count: usize },
  /// The source returned no rows. `empty_feed` distinguishes "nothing
  /// matches this filter at all" from "the user scrolled to the end".
  EndOfFeed { empty_feed: bool },
  /// The fetch failed. The feed is left open so a later trigger can retry.
  Failed { message: String },
  /// Nothing was attempted.
  Skipped(SkipReason),
  /// The feed was reset while this fetch was in flight; its result was
  /// discarded without touching the current items.
  Stale,
}

struct FeedState {
  items: Vec<Product>,
  offset: usize,
  filter: BrowseFilter,
  generation: u64,
  loading: bool,
  exhausted: bool,
  enabled: bool,
}

/// Accumulates pages for one filter at a time.
///
/// At most one fetch is in flight. A reset bumps the generation counter, so
/// a fetch that completes afterwards recognises itself as stale and drops
/// its result instead of appending rows from the previous filter.
pub struct Feed {
  source: Arc<dyn PageSource>,
  page_size: usize,
  state: Mutex<FeedState>,
}

impl Feed {
  pub fn new(source: Arc<dyn PageSource>) -> Self {
    Self::with_options(source, BrowseFilter::all(), FeedOptions::default())
  }

  pub fn with_options(source: Arc<dyn PageSource>, filter: BrowseFilter, options: FeedOptions) -> Self {
    Feed {
      source,
      page_size: options.page_size.max(1),
      state: Mutex::new(FeedState {
        items: Vec::new(),
        offset: 0,
        filter,
        generation: 0,
        loading: false,
        exhausted: false,
        enabled: options.enabled,
      }),
    }
  }

  // --- Read access. Guards are internal; nothing is held across .await. ---

  pub fn loading(&self) -> bool {
    self.state.lock().loading
  }

  pub fn exhausted(&self) -> bool {
    self.state.lock().exhausted
  }

  pub fn len(&self) -> usize {
    self.state.lock().items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.state.lock().items.is_empty()
  }

  pub fn offset(&self) -> usize {
    self.state.lock().offset
  }

  pub fn filter(&self) -> BrowseFilter {
    self.state.lock().filter.clone()
  }

  /// A snapshot of the accumulated items.
  pub fn items(&self) -> Vec<Product> {
    self.state.lock().items.clone()
  }

  /// Runs `f` over the items without cloning them.
  pub fn with_items<R>(&self, f: impl FnOnce(&[Product]) -> R) -> R {
    let state = self.state.lock();
    f(&state.items)
  }

  pub fn set_enabled(&self, enabled: bool) {
    self.state.lock().enabled = enabled;
  }

  /// Drops everything and switches the feed to a new filter. Any fetch
  /// still in flight for the old filter will discard its result.
  #[instrument(name = "Feed::reset", skip_all)]
  pub fn reset(&self, filter: BrowseFilter) {
    let mut state = self.state.lock();
    state.items.clear();
    state.offset = 0;
    state.filter = filter;
    state.generation = state.generation.wrapping_add(1);
    state.loading = false;
    state.exhausted = false;
    event!(Level::DEBUG, generation = state.generation, "Feed reset.");
  }

  /// Fetches and appends the next page. Call this from the scroll trigger;
  /// the guards against duplicate or pointless fetches live here.
  #[instrument(name = "Feed::load_more", skip_all)]
  pub async fn load_more(&self) -> LoadOutcome {
    let (generation, offset, filter) = {
      let mut state = self.state.lock();
      if !state.enabled {
        return LoadOutcome::Skipped(SkipReason::Disabled);
      }
      if state.loading {
        return LoadOutcome::Skipped(SkipReason::Loading);
      }
      if state.exhausted {
        return LoadOutcome::Skipped(SkipReason::Exhausted);
      }
      state.loading = true;
      (state.generation, state.offset, state.filter.clone())
    };

    let fetched = self.source.fetch_page(&filter, offset, self.page_size).await;

    let mut state = self.state.lock();
    if state.generation != generation {
      // A reset already put the state machine where it belongs, including
      // loading = false; this result belongs to the old filter.
      event!(Level::DEBUG, stale_generation = generation, "Discarding stale page.");
      return LoadOutcome::Stale;
    }
    state.loading = false;

    match fetched {
      Err(e) => {
        event!(Level::ERROR, error = %e, offset = offset, "Feed page fetch failed.");
        LoadOutcome::Failed { message: e.to_string() }
      }
      Ok(page) if page.is_empty() => {
        state.exhausted = true;
        event!(Level::DEBUG, offset = offset, "Feed exhausted.");
        LoadOutcome::EndOfFeed { empty_feed: offset == 0 }
      }
      Ok(page) => {
        let count = page.len();
        state.offset += count;
        state.items.extend(page);
        if count < self.page_size {
          state.exhausted = true;
        }
        event!(Level::DEBUG, appended = count, total = state.items.len(), "Feed page appended.");
        LoadOutcome::Appended { count }
      }
    }
  }
}

/// What an empty first page should say, derived from the active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
  pub title: String,
  pub message: String,
}

pub fn empty_state_for(filter: &BrowseFilter) -> EmptyState {
  if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
    return EmptyState {
      title: "No results for your search".into(),
      message: format!("No products match \"{}\". Try different keywords.", term),
    };
  }
  if let Some(category_id) = filter.category_id {
    let name = category::category_name(category_id);
    return EmptyState {
      title: format!("No products in {}", name),
      message: "This category is empty. Check back later for new listings.".into(),
    };
  }
  EmptyState {
    title: "No products available".into(),
    message: "Stay tuned for exciting products coming soon!".into(),
  }
}
