// vitrine_project/demos/storefront_app/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use vitrine::feed::Feed;
use vitrine::images::ImageLoader;
use vitrine::search::SearchDebouncer;
use vitrine::wishlist::WishlistStore;
use vitrine::StoreClient;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>, // Share loaded config
  pub client: Arc<StoreClient>,
  pub feed: Arc<Feed>,
  pub search: Arc<SearchDebouncer>,
  pub images: Arc<ImageLoader>,
  pub wishlist: Arc<WishlistStore>,
}
