// vitrine_project/demos/storefront_app/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Where the wishlist file lives between runs.
  pub wishlist_path: PathBuf,
  pub page_size: usize,
  pub idle_timeout_secs: u64,
  pub idle_warning_secs: u64,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let wishlist_path: PathBuf = env::var("WISHLIST_PATH")
      .unwrap_or_else(|_| "wishlist.json".to_string())
      .into();

    let page_size = env::var("PAGE_SIZE")
      .unwrap_or_else(|_| vitrine::feed::DEFAULT_PAGE_SIZE.to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid PAGE_SIZE: {}", e)))?;
    if page_size == 0 {
      return Err(AppError::Config("PAGE_SIZE must be at least 1".to_string()));
    }

    let idle_timeout_secs = env::var("IDLE_TIMEOUT_SECS")
      .unwrap_or_else(|_| "600".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid IDLE_TIMEOUT_SECS: {}", e)))?;

    let idle_warning_secs = env::var("IDLE_WARNING_SECS")
      .unwrap_or_else(|_| "120".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid IDLE_WARNING_SECS: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      wishlist_path,
      page_size,
      idle_timeout_secs,
      idle_warning_secs,
    })
  }
}
