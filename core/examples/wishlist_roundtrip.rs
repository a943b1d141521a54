// vitrine_core/examples/wishlist_roundtrip.rs

use std::sync::Arc;

use tracing::info;
use vitrine::model::Condition;
use vitrine::wishlist::{FileBackend, WishlistStore};
use vitrine::{Product, StoreError};

// 1. A couple of listings worth saving.
fn demo_product(id: i64, name: &str, price: f64) -> Product {
  Product {
    id,
    name: name.to_string(),
    description: Some("Saved during the walkthrough".to_string()),
    price,
    category_id: 3,
    condition: Condition::UsedExcellent,
    location: "Ibadan".to_string(),
    img_path: Some(format!("listing-{}.jpg", id)),
    seller_id: None,
    seller_name: None,
    created_at: None,
  }
}

#[tokio::main]
async fn main() -> Result<(), StoreError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Wishlist Roundtrip Example ---");

  let path = std::env::temp_dir().join(format!("vitrine-wishlist-{}.json", uuid::Uuid::new_v4()));
  info!("Persisting to {}", path.display());

  // 2. Open a store over a file backend and save a few listings.
  {
    let store = WishlistStore::open(Arc::new(FileBackend::new(&path)));
    assert!(store.is_empty()); // Nothing on disk yet

    let kettle = demo_product(1, "Blue Ceramic Kettle", 12_500.0);
    let lamp = demo_product(2, "Brass Desk Lamp", 8_000.0);

    assert!(store.add(&kettle));
    assert!(!store.add(&kettle)); // Adding the same listing twice is a no-op
    assert!(store.toggle(&lamp)); // Toggling an unsaved listing adds it
    assert_eq!(store.len(), 2);
    assert!(store.contains(kettle.id));
  }

  // 3. Reopen from the same file; the entries survived the restart.
  let store = WishlistStore::open(Arc::new(FileBackend::new(&path)));
  assert_eq!(store.len(), 2);
  for entry in store.items() {
    info!("Saved: {} ({}) in {}", entry.name, entry.condition.label(), entry.location);
  }

  // 4. Toggle one off, then clear the rest.
  let lamp = demo_product(2, "Brass Desk Lamp", 8_000.0);
  assert!(!store.toggle(&lamp)); // Net removal this time
  assert_eq!(store.len(), 1);
  store.clear();
  assert!(store.is_empty());

  // 5. The cleared state is what the next session will see.
  let reopened = WishlistStore::open(Arc::new(FileBackend::new(&path)));
  assert!(reopened.is_empty());

  let _ = std::fs::remove_file(&path);
  Ok(())
}
