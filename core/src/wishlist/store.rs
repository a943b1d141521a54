// vitrine_core/src/wishlist/store.rs

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{event, instrument, Level};

use crate::model::{Product, WishlistEntry};
use crate::wishlist::backend::WishlistBackend;

/// The wishlist: an in-memory mirror of one persisted JSON array.
///
/// All operations are synchronous. Each mutation runs read-modify-write
/// under a single lock, so a toggle can never interleave with another
/// mutation of the same entry, and then persists the whole collection.
/// Persistence failures are logged and the mirror keeps serving; the
/// wishlist must never take the page down.
pub struct WishlistStore {
  backend: Arc<dyn WishlistBackend>,
  entries: Mutex<Vec<WishlistEntry>>,
}

impl WishlistStore {
  /// Opens the store over a backend, loading whatever is persisted there.
  /// An unreadable or malformed payload starts the list empty rather than
  /// failing.
  #[instrument(name = "WishlistStore::open", skip_all)]
  pub fn open(backend: Arc<dyn WishlistBackend>) -> Self {
    let entries = match backend.load() {
      Ok(Some(payload)) => match serde_json::from_str::<Vec<WishlistEntry>>(&payload) {
        Ok(entries) => entries,
        Err(e) => {
          event!(Level::WARN, error = %e, "Stored wishlist is malformed; starting empty.");
          Vec::new()
        }
      },
      Ok(None) => Vec::new(),
      Err(e) => {
        event!(Level::WARN, error = %e, "Could not load wishlist; starting empty.");
        Vec::new()
      }
    };
    event!(Level::DEBUG, count = entries.len(), "Wishlist loaded.");
    WishlistStore {
      backend,
      entries: Mutex::new(entries),
    }
  }

  /// Adds a product if absent. True when it was added, false when it was
  /// already present.
  pub fn add(&self, product: &Product) -> bool {
    let mut entries = self.entries.lock();
    if entries.iter().any(|item| item.id == product.id) {
      return false;
    }
    entries.push(WishlistEntry::from(product));
    self.persist(&entries);
    true
  }

  /// Removes by id. True when something was removed.
  pub fn remove(&self, product_id: i64) -> bool {
    let mut entries = self.entries.lock();
    let before = entries.len();
    entries.retain(|item| item.id != product_id);
    let removed = entries.len() != before;
    self.persist(&entries);
    removed
  }

  /// Flips membership and reports the net effect: true when the product
  /// was added, false when it was removed. Runs as one atomic
  /// read-modify-write.
  pub fn toggle(&self, product: &Product) -> bool {
    let mut entries = self.entries.lock();
    if let Some(index) = entries.iter().position(|item| item.id == product.id) {
      entries.remove(index);
      self.persist(&entries);
      false
    } else {
      entries.push(WishlistEntry::from(product));
      self.persist(&entries);
      true
    }
  }

  pub fn contains(&self, product_id: i64) -> bool {
    self.entries.lock().iter().any(|item| item.id == product_id)
  }

  /// Snapshot of the saved entries, in insertion order.
  pub fn items(&self) -> Vec<WishlistEntry> {
    self.entries.lock().clone()
  }

  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.lock().is_empty()
  }

  pub fn clear(&self) {
    let mut entries = self.entries.lock();
    entries.clear();
    self.persist(&entries);
  }

  /// Re-reads the backend, picking up writes made by another store over the
  /// same entry (another window, another process).
  #[instrument(name = "WishlistStore::refresh", skip_all)]
  pub fn refresh(&self) {
    let loaded = match self.backend.load() {
      Ok(Some(payload)) => match serde_json::from_str::<Vec<WishlistEntry>>(&payload) {
        Ok(entries) => entries,
        Err(e) => {
          event!(Level::WARN, error = %e, "Stored wishlist is malformed; keeping current entries.");
          return;
        }
      },
      Ok(None) => Vec::new(),
      Err(e) => {
        event!(Level::WARN, error = %e, "Could not refresh wishlist; keeping current entries.");
        return;
      }
    };
    *self.entries.lock() = loaded;
  }

  // Caller holds the entries lock, which is what makes mutate+persist
  // atomic with respect to other mutations.
  fn persist(&self, entries: &[WishlistEntry]) {
    let payload = match serde_json::to_string(entries) {
      Ok(payload) => payload,
      Err(e) => {
        event!(Level::ERROR, error = %e, "Could not serialize wishlist.");
        return;
      }
    };
    if let Err(e) = self.backend.store(&payload) {
      event!(Level::ERROR, error = %e, "Could not persist wishlist; in-memory entries remain.");
    }
  }
}
