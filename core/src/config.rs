// vitrine_core/src/config.rs

use crate::error::{Result, StoreError};

use dotenvy::dotenv;
use std::env;

/// Environment variable holding the backend project URL.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the anonymous (publishable) API key.
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Connection settings for the hosted backend (REST, auth and storage all
/// hang off the same project URL).
#[derive(Debug, Clone)]
pub struct StoreConfig {
  pub base_url: String,
  pub api_key: String,
}

impl StoreConfig {
  pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
    let base_url = base_url.into();
    let api_key = api_key.into();

    let base_url = base_url.trim().trim_end_matches('/').to_string();
    if base_url.is_empty() {
      return Err(StoreError::Config("Backend URL must not be empty".into()));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
      return Err(StoreError::Config(format!(
        "Backend URL must be http(s), got '{}'",
        base_url
      )));
    }
    if api_key.trim().is_empty() {
      return Err(StoreError::Config("Backend API key must not be empty".into()));
    }

    Ok(Self { base_url, api_key })
  }

  /// Reads `SUPABASE_URL` and `SUPABASE_ANON_KEY`, loading a `.env` file
  /// first if one is present.
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name)
        .map_err(|e| StoreError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let base_url = get_env(URL_VAR)?;
    let api_key = get_env(KEY_VAR)?;

    let config = Self::new(base_url, api_key)?;
    tracing::info!(base_url = %config.base_url, "Store configuration loaded from environment.");
    Ok(config)
  }
}
