// vitrine_core/src/images/loader.rs

//! Fetch-and-transcode pipeline with per-URL de-duplication.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{event, instrument, Level};

use crate::error::{Result, StoreError};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

// Payloads already small and in a modern format skip the transcoder.
const TRANSCODE_BYPASS_BYTES: usize = 50_000;

/// Raw image payload as it came off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
  pub bytes: Vec<u8>,
  pub content_type: Option<String>,
}

impl FetchedImage {
  fn is_small_webp(&self) -> bool {
    self.bytes.len() < TRANSCODE_BYPASS_BYTES
      && self.content_type.as_deref() == Some("image/webp")
  }
}

/// Fetches the bytes behind an image URL.
#[async_trait]
pub trait ImageFetcher: Send + Sync + 'static {
  async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}

/// Downsizes/recompresses a fetched image off the rendering path.
///
/// Implementations bring their own codec; [`TranscodeConfig`] carries the
/// conventional targets. A transcoder is optional and its failures are
/// never fatal, the loader falls back to the raw payload.
#[async_trait]
pub trait ImageTranscoder: Send + Sync + 'static {
  async fn transcode(&self, image: &FetchedImage) -> Result<FetchedImage>;
}

/// Conventional downsizing targets for product card images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscodeConfig {
  pub max_width: u32,
  pub max_height: u32,
  pub quality: f32,
}

impl Default for TranscodeConfig {
  fn default() -> Self {
    TranscodeConfig {
      max_width: 400,
      max_height: 400,
      quality: 0.85,
    }
  }
}

/// Plain HTTP fetcher for public image URLs.
pub struct HttpImageFetcher {
  http: reqwest::Client,
}

impl HttpImageFetcher {
  pub fn new() -> Result<Self> {
    let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    Ok(Self { http })
  }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
  async fn fetch(&self, url: &str) -> Result<FetchedImage> {
    let response = self.http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(StoreError::Api {
        status: status.as_u16(),
        message: "Failed to fetch image".into(),
      });
    }
    let content_type = response
      .headers()
      .get(reqwest::header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(str::to_string);
    let bytes = response.bytes().await?.to_vec();
    Ok(FetchedImage { bytes, content_type })
  }
}

/// What a placeholder should end up showing.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedImage {
  /// Pixels ready to present, possibly smaller than the original.
  Bytes {
    data: Arc<Vec<u8>>,
    content_type: Option<String>,
    transcoded: bool,
  },
  /// The fetch failed; present the original URL directly and let the
  /// surrounding renderer deal with it.
  Untouched { url: String },
}

impl ResolvedImage {
  pub fn is_bytes(&self) -> bool {
    matches!(self, ResolvedImage::Bytes { .. })
  }
}

/// Resolves image URLs to presentable payloads, once each.
///
/// Outcomes are memoized for the life of the loader, and concurrent
/// requests for the same URL coalesce onto a single fetch: the first caller
/// does the work while the rest wait on a per-URL gate and then read the
/// memo.
pub struct ImageLoader {
  fetcher: Arc<dyn ImageFetcher>,
  transcoder: Option<Arc<dyn ImageTranscoder>>,
  resolved: Mutex<HashMap<String, ResolvedImage>>,
  inflight: AsyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl ImageLoader {
  pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
    ImageLoader {
      fetcher,
      transcoder: None,
      resolved: Mutex::new(HashMap::new()),
      inflight: AsyncMutex::new(HashMap::new()),
    }
  }

  pub fn with_transcoder(fetcher: Arc<dyn ImageFetcher>, transcoder: Arc<dyn ImageTranscoder>) -> Self {
    ImageLoader {
      transcoder: Some(transcoder),
      ..ImageLoader::new(fetcher)
    }
  }

  /// The memoized outcome for a URL, if it has already been resolved.
  pub fn cached(&self, url: &str) -> Option<ResolvedImage> {
    self.resolved.lock().get(url).cloned()
  }

  /// Resolves a URL, fetching at most once however many callers race here.
  #[instrument(name = "ImageLoader::resolve", skip_all, fields(url = %url))]
  pub async fn resolve(&self, url: &str) -> ResolvedImage {
    if let Some(hit) = self.cached(url) {
      return hit;
    }

    let _gate = self.gate(url).await;
    // The fetch may have finished while this caller waited on the gate.
    if let Some(hit) = self.cached(url) {
      return hit;
    }

    let outcome = self.load(url).await;
    self.resolved.lock().insert(url.to_string(), outcome.clone());
    self.inflight.lock().await.remove(url);
    outcome
  }

  /// Warms the cache for one URL. True when pixels were obtained.
  pub async fn preload(&self, url: &str) -> bool {
    self.resolve(url).await.is_bytes()
  }

  /// Warms the cache for a batch of URLs concurrently and reports how many
  /// resolved to pixels.
  pub async fn preload_all(&self, urls: &[String]) -> usize {
    let warms = urls.iter().map(|url| self.preload(url));
    join_all(warms).await.into_iter().filter(|ok| *ok).count()
  }

  async fn gate(&self, url: &str) -> OwnedMutexGuard<()> {
    let lock = {
      let mut inflight = self.inflight.lock().await;
      Arc::clone(
        inflight
          .entry(url.to_string())
          .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
      )
    };
    lock.lock_owned().await
  }

  async fn load(&self, url: &str) -> ResolvedImage {
    let image = match self.fetcher.fetch(url).await {
      Ok(image) => image,
      Err(e) => {
        event!(Level::WARN, error = %e, "Image fetch failed; presenting original URL.");
        return ResolvedImage::Untouched { url: url.to_string() };
      }
    };

    let transcoder = match &self.transcoder {
      Some(t) if !image.is_small_webp() => t,
      _ => {
        return ResolvedImage::Bytes {
          data: Arc::new(image.bytes),
          content_type: image.content_type,
          transcoded: false,
        };
      }
    };

    match transcoder.transcode(&image).await {
      Ok(out) => ResolvedImage::Bytes {
        data: Arc::new(out.bytes),
        content_type: out.content_type,
        transcoded: true,
      },
      Err(e) => {
        event!(Level::WARN, error = %e, "Image transcode failed; presenting raw payload.");
        ResolvedImage::Bytes {
          data: Arc::new(image.bytes),
          content_type: image.content_type,
          transcoded: false,
        }
      }
    }
  }
}
