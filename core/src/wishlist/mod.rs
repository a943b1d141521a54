// vitrine_core/src/wishlist/mod.rs

//! Locally persisted wishlist.
//!
//! The collection lives wholesale in one durable entry as a JSON array;
//! every mutation rewrites it. [`WishlistBackend`] abstracts the entry
//! itself, with file and in-memory implementations provided.

pub mod backend;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, WishlistBackend};
pub use store::WishlistStore;
