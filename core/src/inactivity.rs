// vitrine_core/src/inactivity.rs

//! Idle-session watchdog.
//!
//! Admin surfaces sign sellers out after a stretch of inactivity, with a
//! warning shortly before the cutoff. The watchdog is a spawned task fed by
//! activity pings; it emits events on a channel and stops after signing
//! out. Dropping the handle aborts the task.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{event, Level};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_WARNING_LEAD: Duration = Duration::from_secs(2 * 60);

/// What the watchdog wants the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleEvent {
  /// The warning window opened; tell the user they are about to be signed
  /// out.
  Warning,
  /// Activity arrived while the warning was showing; hide it.
  WarningCleared,
  /// The full timeout elapsed. The watchdog is done after this.
  SignedOut,
}

enum Phase {
  Warn,
  SignOut,
}

/// Handle to a running watchdog. Ping it on every user interaction.
pub struct InactivityWatch {
  activity: watch::Sender<Instant>,
  task: JoinHandle<()>,
}

impl InactivityWatch {
  /// Starts a watchdog with the conventional ten-minute timeout and
  /// two-minute warning lead. Requires a Tokio runtime.
  pub fn spawn() -> (Self, mpsc::UnboundedReceiver<IdleEvent>) {
    Self::spawn_with(DEFAULT_TIMEOUT, DEFAULT_WARNING_LEAD)
  }

  /// Starts a watchdog that signs out after `timeout` of silence, warning
  /// `warning_lead` before it does. A lead of zero (or one at least as long
  /// as the timeout) disables the warning phase.
  pub fn spawn_with(timeout: Duration, warning_lead: Duration) -> (Self, mpsc::UnboundedReceiver<IdleEvent>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (activity_tx, mut activity_rx) = watch::channel(Instant::now());
    let has_warning = !warning_lead.is_zero() && warning_lead < timeout;

    let task = tokio::spawn(async move {
      let mut warned = false;
      loop {
        let last = *activity_rx.borrow_and_update();
        let (deadline, phase) = if has_warning && !warned {
          (last + (timeout - warning_lead), Phase::Warn)
        } else {
          (last + timeout, Phase::SignOut)
        };

        tokio::select! {
          changed = activity_rx.changed() => {
            match changed {
              Ok(()) => {
                if warned {
                  warned = false;
                  if events_tx.send(IdleEvent::WarningCleared).is_err() {
                    break;
                  }
                }
              }
              // All senders gone; the handle was dropped.
              Err(_) => break,
            }
          }
          _ = sleep_until(deadline) => {
            match phase {
              Phase::Warn => {
                warned = true;
                event!(Level::INFO, "Inactivity warning window opened.");
                if events_tx.send(IdleEvent::Warning).is_err() {
                  break;
                }
              }
              Phase::SignOut => {
                event!(Level::INFO, "Session idle past cutoff; requesting sign-out.");
                let _ = events_tx.send(IdleEvent::SignedOut);
                break;
              }
            }
          }
        }
      }
    });

    (
      InactivityWatch {
        activity: activity_tx,
        task,
      },
      events_rx,
    )
  }

  /// Records user activity, pushing both deadlines out.
  pub fn record_activity(&self) {
    self.activity.send_replace(Instant::now());
  }

  /// False once the watchdog has signed out (or was aborted).
  pub fn is_running(&self) -> bool {
    !self.task.is_finished()
  }
}

impl Drop for InactivityWatch {
  fn drop(&mut self) {
    self.task.abort();
  }
}
