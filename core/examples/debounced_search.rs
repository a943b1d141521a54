// vitrine_core/examples/debounced_search.rs

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::info;
use vitrine::search::{SearchDebouncer, DEFAULT_DEBOUNCE};
use vitrine::StoreError;

#[tokio::main]
async fn main() -> Result<(), StoreError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Debounced Search Example ---");
  info!("Default debounce is {:?}; this demo shortens it to keep the run quick.", DEFAULT_DEBOUNCE);

  // 1. Collect dispatched terms. A real app would reset its product feed
  //    with a search filter here.
  let dispatched: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&dispatched);
  let search = SearchDebouncer::with_delay(Duration::from_millis(120), move |term| {
    info!("Dispatching search for {:?}", term);
    sink.lock().push(term);
  });

  // 2. Type faster than the debounce window; nothing goes out yet.
  for prefix in ["k", "ke", "ket"] {
    search.input(prefix);
    tokio::time::sleep(Duration::from_millis(40)).await;
  }
  assert!(dispatched.lock().is_empty()); // Still inside the window

  // 3. Pause, and the last prefix goes out exactly once.
  tokio::time::sleep(Duration::from_millis(250)).await;
  assert_eq!(*dispatched.lock(), vec!["ket".to_string()]);

  // 4. Pressing enter skips the wait entirely.
  search.input("kettle");
  search.submit();
  assert_eq!(search.current(), "kettle");

  // 5. Clearing the box dispatches an empty term so the feed can restore itself.
  search.clear();
  assert_eq!(search.current(), "");

  // Long enough for the disarmed "kettle" timer to have fired if submit had
  // left it running.
  tokio::time::sleep(Duration::from_millis(200)).await;
  assert_eq!(
    *dispatched.lock(),
    vec!["ket".to_string(), "kettle".to_string(), String::new()]
  );

  Ok(())
}
