// vitrine_core/src/images/observer.rs

//! Slot registry between placeholders and the loader.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{event, Level};

use crate::images::loader::{ImageLoader, ResolvedImage};

/// Handle for one observed placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

struct SlotTable {
  next_id: u64,
  waiting: HashMap<u64, String>,
}

/// Tracks which placeholders still carry a deferred source.
///
/// The embedding UI registers a slot per placeholder and reports visibility
/// when its viewport logic fires. A slot is consumed by its first
/// visibility report; later reports for the same slot are no-ops, so one
/// placeholder never triggers two loads.
pub struct ImageObserver {
  loader: Arc<ImageLoader>,
  slots: Mutex<SlotTable>,
}

impl ImageObserver {
  pub fn new(loader: Arc<ImageLoader>) -> Self {
    ImageObserver {
      loader,
      slots: Mutex::new(SlotTable {
        next_id: 0,
        waiting: HashMap::new(),
      }),
    }
  }

  pub fn loader(&self) -> &Arc<ImageLoader> {
    &self.loader
  }

  /// Registers a placeholder with its deferred source URL.
  pub fn observe(&self, deferred_src: impl Into<String>) -> SlotId {
    let mut slots = self.slots.lock();
    let id = slots.next_id;
    slots.next_id += 1;
    slots.waiting.insert(id, deferred_src.into());
    SlotId(id)
  }

  /// Forgets a placeholder that left the page before becoming visible.
  pub fn unobserve(&self, slot: SlotId) {
    self.slots.lock().waiting.remove(&slot.0);
  }

  /// How many placeholders are still waiting to become visible.
  pub fn pending(&self) -> usize {
    self.slots.lock().waiting.len()
  }

  /// Reports that a placeholder entered the viewport. Resolves and returns
  /// its image on first report; `None` for unknown or already-handled
  /// slots.
  pub async fn notify_visible(&self, slot: SlotId) -> Option<ResolvedImage> {
    // Consuming the slot before the fetch makes "handled once" atomic.
    let src = self.slots.lock().waiting.remove(&slot.0)?;
    event!(Level::TRACE, slot = slot.0, "Placeholder became visible.");
    Some(self.loader.resolve(&src).await)
  }
}
