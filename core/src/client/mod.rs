// vitrine_core/src/client/mod.rs

//! The storefront client: one handle over the hosted backend's row, auth
//! and object endpoints.
//!
//! Construction never fails at the call site. When credentials are missing
//! the client degrades to an inert backend: every read reports an empty
//! catalog, every write fails with a configuration error, and public image
//! URLs resolve to the placeholder asset. Browsing UIs stay alive either
//! way.

pub mod ads;
pub mod auth;
mod http;
pub mod products;
pub mod query;
pub mod storage;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{event, Level};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::Session;

use http::HttpTransport;

pub use ads::Ads;
pub use auth::{password_strength, strength_label, Auth};
pub use products::{BrowseFilter, Products};
pub use query::{Direction, SelectQuery};
pub use storage::{
  unique_object_name, Storage, StoredObject, ADS_BUCKET, FALLBACK_PROFILE_IMAGE, MAX_UPLOAD_BYTES,
  PLACEHOLDER_IMAGE, PRODUCTS_BUCKET, PROFILES_BUCKET,
};

// Emitted once per process, however many inert clients get built.
static INERT_NOTICE: Lazy<()> = Lazy::new(|| {
  event!(
    Level::WARN,
    "Backend credentials missing; store client is inert. Reads return empty data, writes fail."
  );
});

enum Backend {
  Http(HttpTransport),
  Inert,
}

pub struct StoreClient {
  backend: Backend,
  url_cache: Mutex<HashMap<String, String>>,
}

impl StoreClient {
  /// A live client over the given backend settings.
  pub fn new(config: StoreConfig) -> Result<Self> {
    Ok(StoreClient {
      backend: Backend::Http(HttpTransport::new(config)?),
      url_cache: Mutex::new(HashMap::new()),
    })
  }

  /// Builds from `SUPABASE_URL` / `SUPABASE_ANON_KEY`. Missing or invalid
  /// settings degrade to an inert client instead of failing, so an
  /// unconfigured checkout of the app still renders.
  pub fn from_env() -> Self {
    match StoreConfig::from_env().and_then(StoreClient::new) {
      Ok(client) => client,
      Err(e) => {
        event!(Level::ERROR, error = %e, "Could not configure store client.");
        StoreClient::inert()
      }
    }
  }

  /// A client with no backend at all. Useful directly in tests and demos.
  pub fn inert() -> Self {
    Lazy::force(&INERT_NOTICE);
    StoreClient {
      backend: Backend::Inert,
      url_cache: Mutex::new(HashMap::new()),
    }
  }

  pub fn is_configured(&self) -> bool {
    matches!(self.backend, Backend::Http(_))
  }

  pub fn products(&self) -> Products<'_> {
    Products { client: self }
  }

  pub fn ads(&self) -> Ads<'_> {
    Ads { client: self }
  }

  pub fn auth(&self) -> Auth<'_> {
    Auth { client: self }
  }

  pub fn storage(&self) -> Storage<'_> {
    Storage { client: self }
  }

  pub(crate) fn transport(&self) -> Option<&HttpTransport> {
    match &self.backend {
      Backend::Http(transport) => Some(transport),
      Backend::Inert => None,
    }
  }

  pub(crate) fn transport_or_err(&self, action: &str) -> Result<&HttpTransport> {
    self.transport().ok_or_else(|| {
      StoreError::Config(format!("Cannot {}: backend not configured", action))
    })
  }

  pub(crate) fn require_session(&self) -> Result<Session> {
    self
      .transport()
      .and_then(|t| t.session())
      .ok_or_else(|| StoreError::Auth {
        message: "You are not authenticated. Please log in again.".into(),
      })
  }
}
