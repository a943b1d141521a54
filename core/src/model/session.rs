// vitrine_core/src/model/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in seller's credential, as issued by the auth endpoint.
///
/// The client keeps exactly one of these (or none) and attaches the access
/// token to authenticated requests. Refreshing an expired session is the
/// caller's concern; an expired session simply stops being presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
  pub access_token: String,
  pub user_id: Uuid,
  pub email: Option<String>,
  pub expires_at: DateTime<Utc>,
}

impl Session {
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}
