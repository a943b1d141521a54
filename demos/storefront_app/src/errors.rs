// vitrine_project/demos/storefront_app/src/errors.rs

use thiserror::Error;
use vitrine::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  /// Malformed command input; the message already tells the user what to
  /// type instead.
  #[error("{0}")]
  Usage(String),

  // StoreError's Display text is written for end users, so it passes
  // through unprefixed.
  #[error("{0}")]
  Store(#[from] StoreError),
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
