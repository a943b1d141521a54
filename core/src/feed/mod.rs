// vitrine_core/src/feed/mod.rs

//! The infinite catalog feed: a paged, filterable product list that grows
//! as the user scrolls.
//!
//! The [`Feed`] controller owns the accumulated items and the paging state
//! machine; a [`PageSource`] supplies pages. Wire the controller to
//! [`CatalogSource`] for the live backend, or to any closure via
//! [`FnPageSource`] in tests and demos.

pub mod controller;
pub mod source;

pub use controller::{empty_state_for, EmptyState, Feed, FeedOptions, LoadOutcome, SkipReason, DEFAULT_PAGE_SIZE};
pub use source::{CatalogSource, FnPageSource, PageSource};

pub use crate::client::products::BrowseFilter;
