// src/lib.rs

//! Vitrine: an ASYNC client toolkit for marketplace storefronts in Rust.
//!
//! Vitrine packages the client-side machinery a storefront UI needs on top
//! of a hosted backend (rows, auth, object storage), with features like:
//!  - An infinite catalog feed with at-most-one fetch in flight and
//!    stale-page discard across filter changes.
//!  - Lazy image resolution, de-duplicated per URL, with optional
//!    off-the-render-path transcoding.
//!  - A locally persisted wishlist with atomic toggle semantics.
//!  - Debounced search dispatch with immediate submit and clear.
//!  - An idle-session watchdog for seller dashboards.
//!  - A client facade that degrades to an inert backend when credentials
//!    are missing, instead of failing construction.

// Declare modules according to the planned structure
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod images;
pub mod inactivity;
pub mod model;
pub mod search;
pub mod wishlist;

// --- Re-exports for the Public API ---

// The client facade and its per-surface handles
pub use crate::client::{Ads, Auth, Products, Storage, StoreClient};
pub use crate::client::{BrowseFilter, Direction, SelectQuery, StoredObject};
pub use crate::config::StoreConfig;

// The feed controller is the piece most UIs touch every frame
pub use crate::feed::{CatalogSource, Feed, FeedOptions, LoadOutcome, PageSource, SkipReason};

pub use crate::images::{ImageFetcher, ImageLoader, ImageObserver, ImageTranscoder, ResolvedImage};

pub use crate::wishlist::{FileBackend, MemoryBackend, WishlistBackend, WishlistStore};

pub use crate::search::SearchDebouncer;

pub use crate::inactivity::{IdleEvent, InactivityWatch};

pub use crate::model::{Ad, Condition, NewProduct, Product, Session, WishlistEntry};

pub use crate::error::{Result, StoreError, ValidationErrors};

/*
    Core workflow:
    1. Build a `StoreClient` (from explicit `StoreConfig` or `from_env()`).
    2. Wrap it in a `CatalogSource` and hand that to a `Feed` for browsing;
       call `feed.load_more()` from your scroll trigger and `feed.reset(...)`
       on filter changes.
    3. Register product card placeholders on an `ImageObserver`; report
       visibility with `notify_visible(slot)` and present the resolved bytes.
    4. Open a `WishlistStore` over a `FileBackend` and wire `toggle` to the
       heart buttons.
    5. Route the search box through a `SearchDebouncer` whose dispatch calls
       `feed.reset(BrowseFilter::search(term))`.
    6. For seller dashboards, `Auth::sign_in`, then spawn an
       `InactivityWatch` and sign out when it says so.
*/
