// vitrine_core/src/client/auth.rs

//! Credential operations against the hosted auth endpoint, plus the
//! client-side password strength meter used by sign-up forms.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};
use uuid::Uuid;

use crate::client::StoreClient;
use crate::error::Result;
use crate::model::Session;

#[derive(Serialize)]
struct PasswordGrant<'a> {
  email: &'a str,
  password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
  access_token: String,
  expires_in: i64,
  user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
  id: Uuid,
  #[serde(default)]
  email: Option<String>,
}

/// The credential surface of the client. At most one session is held at a
/// time; it is attached to every authenticated request until it expires or
/// `sign_out` clears it.
pub struct Auth<'a> {
  pub(crate) client: &'a StoreClient,
}

impl Auth<'_> {
  /// Exchanges an email/password pair for a session and installs it on the
  /// client. Bad credentials come back as `StoreError::Auth`.
  #[instrument(name = "Auth::sign_in", skip_all, err(Display))]
  pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
    let transport = self.client.transport_or_err("sign in")?;
    let grant = PasswordGrant { email, password };
    let token: TokenResponse = transport
      .auth_post("token", &[("grant_type", "password")], &grant)
      .await?;

    let session = Session {
      access_token: token.access_token,
      user_id: token.user.id,
      email: token.user.email,
      expires_at: Utc::now() + Duration::seconds(token.expires_in),
    };
    transport.set_session(session.clone());
    event!(Level::INFO, user_id = %session.user_id, "Signed in.");
    Ok(session)
  }

  /// Registers a new account. The backend mails a confirmation link; no
  /// session is created here.
  #[instrument(name = "Auth::sign_up", skip_all, err(Display))]
  pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
    let transport = self.client.transport_or_err("sign up")?;
    let grant = PasswordGrant { email, password };
    // The signup response echoes the user object; nothing in it is needed
    // until the account is confirmed.
    transport.auth_post_unit("signup", &[], &grant).await
  }

  /// Asks the backend to mail a password reset link. `redirect_to` is where
  /// the link lands the user afterwards.
  #[instrument(name = "Auth::request_password_reset", skip_all, err(Display))]
  pub async fn request_password_reset(&self, email: &str, redirect_to: &str) -> Result<()> {
    let transport = self.client.transport_or_err("request a password reset")?;
    let body = serde_json::json!({ "email": email });
    transport
      .auth_post_unit("recover", &[("redirect_to", redirect_to)], &body)
      .await
  }

  /// Revokes the current session server-side and always drops it locally,
  /// even when the revoke call fails.
  #[instrument(name = "Auth::sign_out", skip_all, err(Display))]
  pub async fn sign_out(&self) -> Result<()> {
    let Some(transport) = self.client.transport() else {
      return Ok(());
    };
    if transport.session().is_none() {
      return Ok(());
    }

    let result = transport.auth_post_unit("logout", &[], &serde_json::json!({})).await;
    transport.clear_session();
    match result {
      Ok(()) => {
        event!(Level::INFO, "Signed out.");
        Ok(())
      }
      Err(e) => {
        event!(Level::WARN, error = %e, "Server-side sign-out failed; local session dropped anyway.");
        Err(e)
      }
    }
  }

  /// The live session, if any. Expired sessions read as signed out.
  pub fn session(&self) -> Option<Session> {
    self.client.transport().and_then(|t| t.session())
  }

  pub fn user_id(&self) -> Option<Uuid> {
    self.session().map(|s| s.user_id)
  }

  pub fn is_signed_in(&self) -> bool {
    self.session().is_some()
  }
}

/// Password strength score, 0 to 5: one point each for length of at least
/// eight, a lowercase letter, an uppercase letter, a digit and a symbol.
pub fn password_strength(password: &str) -> u8 {
  let mut score = 0u8;
  if password.chars().count() >= 8 {
    score += 1;
  }
  if password.chars().any(|c| c.is_ascii_lowercase()) {
    score += 1;
  }
  if password.chars().any(|c| c.is_ascii_uppercase()) {
    score += 1;
  }
  if password.chars().any(|c| c.is_ascii_digit()) {
    score += 1;
  }
  if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
    score += 1;
  }
  score
}

/// Label shown next to the strength meter.
pub fn strength_label(score: u8) -> &'static str {
  match score {
    s if s >= 4 => "Strong",
    3 => "Good",
    2 => "Fair",
    _ => "Weak",
  }
}
