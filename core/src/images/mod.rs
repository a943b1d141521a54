// vitrine_core/src/images/mod.rs

//! Lazy image loading: placeholders register a deferred source, visibility
//! triggers resolve it, and every URL is fetched at most once.
//!
//! Scroll/viewport detection belongs to the embedding UI; this module owns
//! everything after "this placeholder just became visible".

pub mod loader;
pub mod observer;

pub use loader::{
  FetchedImage, HttpImageFetcher, ImageFetcher, ImageLoader, ImageTranscoder, ResolvedImage,
  TranscodeConfig,
};
pub use observer::{ImageObserver, SlotId};
