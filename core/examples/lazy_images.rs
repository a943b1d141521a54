// vitrine_core/examples/lazy_images.rs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use vitrine::images::{FetchedImage, ImageFetcher, ImageLoader, ImageObserver, ResolvedImage};
use vitrine::{Result, StoreError};

// 1. A stand-in fetcher so the example runs offline. A live app would use
//    HttpImageFetcher and real object-storage URLs.
#[derive(Default)]
struct DemoFetcher {
  fetches: AtomicUsize,
}

#[async_trait]
impl ImageFetcher for DemoFetcher {
  async fn fetch(&self, url: &str) -> Result<FetchedImage> {
    self.fetches.fetch_add(1, Ordering::SeqCst);
    info!("Fetching {}", url);
    Ok(FetchedImage {
      bytes: vec![0u8; 2_048],
      content_type: Some("image/jpeg".to_string()),
    })
  }
}

#[tokio::main]
async fn main() -> Result<(), StoreError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Lazy Images Example ---");

  let fetcher = Arc::new(DemoFetcher::default());
  let loader = Arc::new(ImageLoader::new(fetcher.clone()));

  // 2. Observe three product-card slots; nothing is fetched up front.
  let observer = ImageObserver::new(Arc::clone(&loader));
  let first = observer.observe("demo://products/listing-1.jpg");
  let second = observer.observe("demo://products/listing-2.jpg");
  let third = observer.observe("demo://products/listing-3.jpg");
  assert_eq!(observer.pending(), 3);
  assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 0);

  // 3. The first card scrolls into view.
  let resolved = observer.notify_visible(first).await;
  assert!(matches!(resolved, Some(ResolvedImage::Bytes { .. })));
  assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);

  // A slot fires once; later visibility reports are ignored.
  assert!(observer.notify_visible(first).await.is_none());

  // 4. A card leaves the list before ever being seen.
  observer.unobserve(third);
  assert!(observer.notify_visible(third).await.is_none());
  assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);

  // 5. Resolving the same URL again is a memo hit, not a refetch.
  let again = loader.resolve("demo://products/listing-1.jpg").await;
  assert!(again.is_bytes());
  assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 1);
  assert!(loader.cached("demo://products/listing-2.jpg").is_none());

  // 6. Warm the rest of the page ahead of scrolling.
  let urls: Vec<String> = (2..=4)
    .map(|n| format!("demo://products/listing-{}.jpg", n))
    .collect();
  let warmed = loader.preload_all(&urls).await;
  info!("Warmed {} images ahead of scrolling.", warmed);
  assert_eq!(warmed, 3);
  assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 4);

  // 7. The second card now shows instantly when it finally scrolls in.
  assert!(observer.notify_visible(second).await.is_some());
  assert_eq!(fetcher.fetches.load(Ordering::SeqCst), 4);

  Ok(())
}
