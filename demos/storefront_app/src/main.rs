// vitrine_project/demos/storefront_app/src/main.rs

// Declare modules for the application
mod config;
mod errors;
mod repl;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;

use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use vitrine::feed::{BrowseFilter, CatalogSource, Feed, FeedOptions};
use vitrine::images::{HttpImageFetcher, ImageLoader};
use vitrine::search::SearchDebouncer;
use vitrine::wishlist::{FileBackend, WishlistStore};
use vitrine::StoreClient;

// Main function
#[tokio::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::WARN) // Keep the terminal clear for the storefront itself
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront terminal client...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      // For a simple demo, panic is okay. In prod, might exit gracefully.
      panic!("Configuration error: {}", e);
    }
  };

  // The client degrades to an inert backend when credentials are missing,
  // so an unconfigured checkout still opens with empty shelves.
  let client = Arc::new(StoreClient::from_env());

  // The one feed this terminal pages through; commands swap its filter.
  let feed = Arc::new(Feed::with_options(
    Arc::new(CatalogSource::new(Arc::clone(&client))),
    BrowseFilter::all(),
    FeedOptions {
      page_size: app_config.page_size,
      enabled: true,
    },
  ));

  // Search box semantics: typing would debounce, enter submits. The REPL
  // only ever submits, but the wiring is the same as a GUI's.
  let search = {
    let feed = Arc::clone(&feed);
    Arc::new(SearchDebouncer::new(move |term| {
      let filter = if term.trim().is_empty() {
        BrowseFilter::all()
      } else {
        BrowseFilter::search(term)
      };
      feed.reset(filter);
    }))
  };

  let images = match HttpImageFetcher::new() {
    Ok(fetcher) => Arc::new(ImageLoader::new(Arc::new(fetcher))),
    Err(e) => {
      tracing::error!(error = %e, "Failed to build the image fetcher.");
      panic!("HTTP client error: {}", e);
    }
  };

  let wishlist = Arc::new(WishlistStore::open(Arc::new(FileBackend::new(
    &app_config.wishlist_path,
  ))));

  // Create AppState
  let app_state = AppState {
    config: app_config,
    client,
    feed,
    search,
    images,
    wishlist,
  };

  repl::run(app_state).await
}
