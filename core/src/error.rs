// vitrine_core/src/error.rs
use std::fmt;

use anyhow::Error as AnyhowError;
use thiserror::Error;

/// A single rejected field from form validation, keyed by the field name
/// used in the backend row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field: &'static str,
  pub message: String,
}

/// The full set of per-field rejections from validating a submission.
///
/// Kept as a list (not a map) so callers can render messages in the order
/// the fields appear on a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.push(FieldError {
      field,
      message: message.into(),
    });
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Message for one field, if that field was rejected.
  pub fn message_for(&self, field: &str) -> Option<&str> {
    self
      .0
      .iter()
      .find(|e| e.field == field)
      .map(|e| e.message.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
    self.0.iter()
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for e in &self.0 {
      if !first {
        write!(f, "; ")?;
      }
      write!(f, "{}: {}", e.field, e.message)?;
      first = false;
    }
    Ok(())
  }
}

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Request failed: {source}")]
  Request {
    #[from]
    source: reqwest::Error,
  },

  #[error("Backend rejected the request ({status}): {message}")]
  Api { status: u16, message: String },

  #[error("Malformed backend payload: {source}")]
  Decode {
    #[from]
    source: serde_json::Error,
  },

  #[error("Validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("Authentication failed: {message}")]
  Auth { message: String },

  #[error("Not permitted: {message}")]
  Forbidden { message: String },

  #[error("Not found: {what}")]
  NotFound { what: String },

  #[error("Storage operation failed: {message}")]
  Storage { message: String },

  #[error("Internal error. Source: {source}")]
  Internal {
    #[source]
    source: AnyhowError,
  },
}

// External errors from injected callbacks and helpers funnel through anyhow,
// so give them one obvious landing spot.
impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Internal { source: err }
  }
}

impl StoreError {
  /// True when retrying the same call later could plausibly succeed
  /// (network hiccups, backend 5xx). Validation and auth failures are not
  /// retriable without changing the input.
  pub fn is_retriable(&self) -> bool {
    match self {
      StoreError::Request { .. } => true,
      StoreError::Api { status, .. } => *status >= 500,
      _ => false,
    }
  }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
