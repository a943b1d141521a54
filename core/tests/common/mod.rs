// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::{
  atomic::{AtomicBool, AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::Level;

use vitrine::feed::{BrowseFilter, PageSource};
use vitrine::images::{FetchedImage, ImageFetcher, ImageTranscoder};
use vitrine::model::Condition;
use vitrine::wishlist::{MemoryBackend, WishlistBackend};
use vitrine::{NewProduct, Product, StoreError};

// --- Product Factories ---

pub fn sample_product(id: i64) -> Product {
  Product {
    id,
    name: format!("Listing {}", id),
    description: Some(format!("Description for listing {}", id)),
    price: 1000.0 + id as f64,
    category_id: 1,
    condition: Condition::BrandNew,
    location: "Lagos".to_string(),
    img_path: Some(format!("listing-{}.jpg", id)),
    seller_id: None,
    seller_name: None,
    created_at: None,
  }
}

pub fn product_in_category(id: i64, category_id: i64) -> Product {
  Product {
    category_id,
    ..sample_product(id)
  }
}

/// `count` listings with ids 1..=count. Sources serve them newest-first.
pub fn catalog(count: usize) -> Vec<Product> {
  (1..=count as i64).map(sample_product).collect()
}

/// A submission that passes validation as-is.
pub fn valid_listing() -> NewProduct {
  NewProduct {
    name: "Espresso Machine".to_string(),
    description: Some("Barely used, all parts included".to_string()),
    price: 45_500.0,
    category_id: 3,
    condition: Condition::UsedExcellent,
    location: "Ibadan".to_string(),
    seller_name: "Ada".to_string(),
    img_path: None,
  }
}

// --- Scripted Page Source ---

/// One recorded `fetch_page` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCall {
  pub filter: BrowseFilter,
  pub offset: usize,
  pub limit: usize,
}

/// In-memory catalog that answers like the backend would: filters applied,
/// newest-first by id, then the requested row window. Can be told to fail
/// the next call, or to hold the next call until the test releases it.
pub struct ScriptedSource {
  rows: Vec<Product>,
  calls: Mutex<Vec<PageCall>>,
  fail_next: AtomicBool,
  hold_next: Mutex<Option<Arc<Notify>>>,
}

impl ScriptedSource {
  pub fn new(rows: Vec<Product>) -> Self {
    ScriptedSource {
      rows,
      calls: Mutex::new(Vec::new()),
      fail_next: AtomicBool::new(false),
      hold_next: Mutex::new(None),
    }
  }

  pub fn calls(&self) -> Vec<PageCall> {
    self.calls.lock().clone()
  }

  /// The next `fetch_page` call errors instead of answering.
  pub fn fail_next(&self) {
    self.fail_next.store(true, Ordering::SeqCst);
  }

  /// The next `fetch_page` call blocks until the returned gate is
  /// notified. The call is logged before it blocks, so tests can wait for
  /// the log to know the fetch is in flight.
  pub fn hold_next(&self) -> Arc<Notify> {
    let gate = Arc::new(Notify::new());
    *self.hold_next.lock() = Some(Arc::clone(&gate));
    gate
  }

  fn matching(&self, filter: &BrowseFilter) -> Vec<Product> {
    let term = filter
      .search
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(str::to_lowercase);
    let mut rows: Vec<Product> = self
      .rows
      .iter()
      .filter(|p| filter.category_id.map_or(true, |c| p.category_id == c))
      .filter(|p| filter.exclude_id.map_or(true, |x| p.id != x))
      .filter(|p| {
        term.as_deref().map_or(true, |t| {
          p.name.to_lowercase().contains(t)
            || p
              .description
              .as_deref()
              .map_or(false, |d| d.to_lowercase().contains(t))
        })
      })
      .cloned()
      .collect();
    rows.sort_by(|a, b| b.id.cmp(&a.id));
    rows
  }
}

#[async_trait]
impl PageSource for ScriptedSource {
  async fn fetch_page(&self, filter: &BrowseFilter, offset: usize, limit: usize) -> vitrine::Result<Vec<Product>> {
    self.calls.lock().push(PageCall {
      filter: filter.clone(),
      offset,
      limit,
    });

    let gate = self.hold_next.lock().take();
    if let Some(gate) = gate {
      gate.notified().await;
    }

    if self.fail_next.swap(false, Ordering::SeqCst) {
      return Err(StoreError::Api {
        status: 500,
        message: "scripted page failure".to_string(),
      });
    }

    Ok(self.matching(filter).into_iter().skip(offset).take(limit).collect())
  }
}

// --- Image Doubles ---

/// Serves a fixed payload for every URL and counts fetches. Configure the
/// fields before wrapping it in an `Arc`.
pub struct CountingFetcher {
  pub payload: Vec<u8>,
  pub content_type: Option<String>,
  pub delay: Duration,
  fetches: AtomicUsize,
  failing: Mutex<Vec<String>>,
}

impl CountingFetcher {
  pub fn new() -> Self {
    CountingFetcher {
      payload: b"pixels".to_vec(),
      content_type: Some("image/jpeg".to_string()),
      delay: Duration::ZERO,
      fetches: AtomicUsize::new(0),
      failing: Mutex::new(Vec::new()),
    }
  }

  pub fn fetch_count(&self) -> usize {
    self.fetches.load(Ordering::SeqCst)
  }

  /// Every fetch of `url` errors.
  pub fn fail_for(&self, url: &str) {
    self.failing.lock().push(url.to_string());
  }
}

#[async_trait]
impl ImageFetcher for CountingFetcher {
  async fn fetch(&self, url: &str) -> vitrine::Result<FetchedImage> {
    self.fetches.fetch_add(1, Ordering::SeqCst);
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
    if self.failing.lock().iter().any(|u| u == url) {
      return Err(StoreError::Api {
        status: 500,
        message: format!("scripted fetch failure for {}", url),
      });
    }
    Ok(FetchedImage {
      bytes: self.payload.clone(),
      content_type: self.content_type.clone(),
    })
  }
}

/// Truncates the payload to half its size and stamps it `image/webp`,
/// counting invocations.
pub struct HalvingTranscoder {
  runs: AtomicUsize,
}

impl HalvingTranscoder {
  pub fn new() -> Self {
    HalvingTranscoder {
      runs: AtomicUsize::new(0),
    }
  }

  pub fn run_count(&self) -> usize {
    self.runs.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ImageTranscoder for HalvingTranscoder {
  async fn transcode(&self, image: &FetchedImage) -> vitrine::Result<FetchedImage> {
    self.runs.fetch_add(1, Ordering::SeqCst);
    Ok(FetchedImage {
      bytes: image.bytes[..image.bytes.len() / 2].to_vec(),
      content_type: Some("image/webp".to_string()),
    })
  }
}

pub struct FailingTranscoder;

#[async_trait]
impl ImageTranscoder for FailingTranscoder {
  async fn transcode(&self, _image: &FetchedImage) -> vitrine::Result<FetchedImage> {
    Err(StoreError::Storage {
      message: "scripted transcode failure".to_string(),
    })
  }
}

// --- Wishlist Doubles ---

/// Loads fine but refuses every write, for exercising persistence-failure
/// paths.
pub struct WriteFailBackend {
  inner: MemoryBackend,
}

impl WriteFailBackend {
  pub fn new() -> Self {
    WriteFailBackend {
      inner: MemoryBackend::new(),
    }
  }
}

impl WishlistBackend for WriteFailBackend {
  fn load(&self) -> vitrine::Result<Option<String>> {
    self.inner.load()
  }

  fn store(&self, _payload: &str) -> vitrine::Result<()> {
    Err(StoreError::Storage {
      message: "scripted store failure".to_string(),
    })
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
