// vitrine_core/src/feed/source.rs

//! Where feed pages come from.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::client::products::BrowseFilter;
use crate::client::StoreClient;
use crate::error::Result;
use crate::model::Product;

/// Supplies one page of products for a filter and row window.
///
/// Implementations must tolerate being called with any offset the
/// controller has reached; returning an empty page tells the controller the
/// source is drained at that position.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
  async fn fetch_page(&self, filter: &BrowseFilter, offset: usize, limit: usize) -> Result<Vec<Product>>;
}

/// The live catalog as a page source.
pub struct CatalogSource {
  client: Arc<StoreClient>,
}

impl CatalogSource {
  pub fn new(client: Arc<StoreClient>) -> Self {
    Self { client }
  }
}

#[async_trait]
impl PageSource for CatalogSource {
  async fn fetch_page(&self, filter: &BrowseFilter, offset: usize, limit: usize) -> Result<Vec<Product>> {
    self.client.products().browse(filter, offset, limit).await
  }
}

/// A page source backed by a closure, for demos and tests.
pub struct FnPageSource<F, Fut>
where
  F: Fn(BrowseFilter, usize, usize) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<Vec<Product>>> + Send + 'static,
{
  fetch: F,
}

impl<F, Fut> FnPageSource<F, Fut>
where
  F: Fn(BrowseFilter, usize, usize) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<Vec<Product>>> + Send + 'static,
{
  pub fn new(fetch: F) -> Self {
    Self { fetch }
  }
}

#[async_trait]
impl<F, Fut> PageSource for FnPageSource<F, Fut>
where
  F: Fn(BrowseFilter, usize, usize) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<Vec<Product>>> + Send + 'static,
{
  async fn fetch_page(&self, filter: &BrowseFilter, offset: usize, limit: usize) -> Result<Vec<Product>> {
    (self.fetch)(filter.clone(), offset, limit).await
  }
}
