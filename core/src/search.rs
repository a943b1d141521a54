// vitrine_core/src/search.rs

//! Debounced search input.
//!
//! Keystrokes update a mirror of the field and (re)arm a timer; only an
//! idle pause dispatches the term. Submit and clear bypass the timer and
//! dispatch immediately, cancelling whatever was armed. Dropping the
//! debouncer cancels the armed timer, so no dispatch outlives its field.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{event, Level};

/// The idle pause after the last keystroke before a search dispatches.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

type Dispatch = Arc<dyn Fn(String) + Send + Sync + 'static>;

struct DebounceState {
  text: String,
  // Every intent change (keystroke, submit, clear) bumps the epoch; an
  // armed timer only fires if the epoch it captured is still current.
  epoch: u64,
  pending: Option<JoinHandle<()>>,
}

/// Debounces a search field into a dispatch callback.
///
/// Requires a Tokio runtime; the timer is a spawned task. The callback runs
/// off the caller's stack and must not assume any particular thread.
pub struct SearchDebouncer {
  delay: Duration,
  dispatch: Dispatch,
  state: Arc<Mutex<DebounceState>>,
}

impl SearchDebouncer {
  pub fn new(dispatch: impl Fn(String) + Send + Sync + 'static) -> Self {
    Self::with_delay(DEFAULT_DEBOUNCE, dispatch)
  }

  pub fn with_delay(delay: Duration, dispatch: impl Fn(String) + Send + Sync + 'static) -> Self {
    SearchDebouncer {
      delay,
      dispatch: Arc::new(dispatch),
      state: Arc::new(Mutex::new(DebounceState {
        text: String::new(),
        epoch: 0,
        pending: None,
      })),
    }
  }

  /// The field's current text.
  pub fn current(&self) -> String {
    self.state.lock().text.clone()
  }

  /// Pre-fills the field without arming the timer or dispatching, for
  /// restoring a remembered term.
  pub fn seed(&self, text: impl Into<String>) {
    self.state.lock().text = text.into();
  }

  /// A keystroke: remembers the new text and re-arms the timer. If nothing
  /// else happens for the debounce delay, the text dispatches.
  pub fn input(&self, text: impl Into<String>) {
    let text = text.into();
    let mut state = self.state.lock();
    state.text = text.clone();
    state.epoch += 1;
    if let Some(pending) = state.pending.take() {
      pending.abort();
    }

    let epoch = state.epoch;
    let delay = self.delay;
    let dispatch = Arc::clone(&self.dispatch);
    let shared = Arc::clone(&self.state);
    state.pending = Some(tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      let claimed = {
        let mut state = shared.lock();
        if state.epoch == epoch {
          state.pending = None;
          true
        } else {
          false
        }
      };
      if claimed {
        event!(Level::DEBUG, term = %text, "Debounce window elapsed; dispatching search.");
        dispatch(text);
      }
    }));
  }

  /// Explicit submit (button or Enter): cancels the armed timer and
  /// dispatches the current text immediately.
  pub fn submit(&self) {
    let text = {
      let mut state = self.state.lock();
      state.epoch += 1;
      if let Some(pending) = state.pending.take() {
        pending.abort();
      }
      state.text.clone()
    };
    (self.dispatch)(text);
  }

  /// Clears the field: cancels the armed timer and immediately dispatches
  /// the empty term so results reset without waiting out the delay.
  pub fn clear(&self) {
    {
      let mut state = self.state.lock();
      state.text.clear();
      state.epoch += 1;
      if let Some(pending) = state.pending.take() {
        pending.abort();
      }
    }
    (self.dispatch)(String::new());
  }
}

impl Drop for SearchDebouncer {
  fn drop(&mut self) {
    if let Some(pending) = self.state.lock().pending.take() {
      pending.abort();
    }
  }
}
