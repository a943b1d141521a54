// vitrine_core/src/client/http.rs

//! The single HTTP transport behind the REST, auth and storage surfaces.
//!
//! Everything speaks to the same project host: `/rest/v1/*` for rows,
//! `/auth/v1/*` for credentials, `/storage/v1/*` for objects. Each surface
//! reports failures through its own `StoreError` variant so callers can
//! tell a rejected row filter from a rejected password.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_RANGE, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{event, instrument, Level};

use crate::client::query::SelectQuery;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::model::Session;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub(crate) struct HttpTransport {
  http: reqwest::Client,
  base_url: String,
  api_key: String,
  // Guard is sync and MUST NOT be held across an .await point.
  session: RwLock<Option<Session>>,
}

impl HttpTransport {
  pub(crate) fn new(config: StoreConfig) -> Result<Self> {
    let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self {
      http,
      base_url: config.base_url,
      api_key: config.api_key,
      session: RwLock::new(None),
    })
  }

  // --- Session handling ---

  /// The live session, if one is present and not past its expiry. An
  /// expired session is cleared on the way out.
  pub(crate) fn session(&self) -> Option<Session> {
    {
      let guard = self.session.read();
      match guard.as_ref() {
        Some(s) if !s.is_expired() => return Some(s.clone()),
        None => return None,
        Some(_) => {}
      }
    }
    event!(Level::DEBUG, "Discarding expired session.");
    *self.session.write() = None;
    None
  }

  pub(crate) fn set_session(&self, session: Session) {
    *self.session.write() = Some(session);
  }

  pub(crate) fn clear_session(&self) {
    *self.session.write() = None;
  }

  // --- Request plumbing ---

  fn bearer_token(&self) -> String {
    self
      .session()
      .map(|s| s.access_token)
      .unwrap_or_else(|| self.api_key.clone())
  }

  fn auth_headers(&self) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let apikey = HeaderValue::from_str(&self.api_key)
      .map_err(|_| StoreError::Config("API key contains invalid header characters".into()))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {}", self.bearer_token()))
      .map_err(|_| StoreError::Config("Access token contains invalid header characters".into()))?;
    headers.insert("apikey", apikey);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
  }

  fn rest_url(&self, table: &str) -> String {
    format!("{}/rest/v1/{}", self.base_url, table)
  }

  // --- REST rows ---

  #[instrument(name = "HttpTransport::select", skip_all, fields(table = %table), err(Display))]
  pub(crate) async fn select<T: DeserializeOwned>(&self, table: &str, query: SelectQuery) -> Result<Vec<T>> {
    let response = self
      .http
      .get(self.rest_url(table))
      .headers(self.auth_headers()?)
      .query(&query.into_params())
      .send()
      .await?;
    let response = check_rest(response).await?;
    let bytes = response.bytes().await?;
    let rows = serde_json::from_slice(&bytes)?;
    Ok(rows)
  }

  /// Fetches exactly one row via the single-object representation. Zero
  /// matching rows surface as `NotFound`.
  #[instrument(name = "HttpTransport::select_one", skip_all, fields(table = %table), err(Display))]
  pub(crate) async fn select_one<T: DeserializeOwned>(&self, table: &str, query: SelectQuery) -> Result<T> {
    let response = self
      .http
      .get(self.rest_url(table))
      .headers(self.auth_headers()?)
      .header("Accept", "application/vnd.pgrst.object+json")
      .query(&query.into_params())
      .send()
      .await?;

    if matches!(response.status(), StatusCode::NOT_ACCEPTABLE | StatusCode::NOT_FOUND) {
      return Err(StoreError::NotFound {
        what: format!("row in '{}'", table),
      });
    }
    let response = check_rest(response).await?;
    let bytes = response.bytes().await?;
    let row = serde_json::from_slice(&bytes)?;
    Ok(row)
  }

  /// Exact row count for a filter, without transferring rows.
  #[instrument(name = "HttpTransport::count_exact", skip_all, fields(table = %table), err(Display))]
  pub(crate) async fn count_exact(&self, table: &str, query: SelectQuery) -> Result<u64> {
    let response = self
      .http
      .head(self.rest_url(table))
      .headers(self.auth_headers()?)
      .header("Prefer", "count=exact")
      .query(&query.into_params())
      .send()
      .await?;
    let response = check_rest(response).await?;

    let range = response
      .headers()
      .get(CONTENT_RANGE)
      .and_then(|v| v.to_str().ok())
      .unwrap_or_default();
    parse_exact_count(range).ok_or_else(|| StoreError::Internal {
      source: anyhow::anyhow!("Backend returned no exact count (content-range: '{}')", range),
    })
  }

  #[instrument(name = "HttpTransport::insert", skip_all, fields(table = %table), err(Display))]
  pub(crate) async fn insert_returning<B, T>(&self, table: &str, row: &B) -> Result<Vec<T>>
  where
    B: Serialize + Sync,
    T: DeserializeOwned,
  {
    let response = self
      .http
      .post(self.rest_url(table))
      .headers(self.auth_headers()?)
      .header("Prefer", "return=representation")
      .json(&[row])
      .send()
      .await?;
    let response = check_rest(response).await?;
    let bytes = response.bytes().await?;
    let rows = serde_json::from_slice(&bytes)?;
    Ok(rows)
  }

  #[instrument(name = "HttpTransport::update", skip_all, fields(table = %table), err(Display))]
  pub(crate) async fn update_where<B: Serialize + Sync>(
    &self,
    table: &str,
    query: SelectQuery,
    changes: &B,
  ) -> Result<()> {
    let response = self
      .http
      .patch(self.rest_url(table))
      .headers(self.auth_headers()?)
      .query(&query.into_params())
      .json(changes)
      .send()
      .await?;
    check_rest(response).await?;
    Ok(())
  }

  #[instrument(name = "HttpTransport::delete", skip_all, fields(table = %table), err(Display))]
  pub(crate) async fn delete_where(&self, table: &str, query: SelectQuery) -> Result<()> {
    let response = self
      .http
      .delete(self.rest_url(table))
      .headers(self.auth_headers()?)
      .query(&query.into_params())
      .send()
      .await?;
    check_rest(response).await?;
    Ok(())
  }

  // --- Auth endpoints ---

  #[instrument(name = "HttpTransport::auth_post", skip_all, fields(path = %path), err(Display))]
  pub(crate) async fn auth_post<B, T>(&self, path: &str, query: &[(&str, &str)], body: &B) -> Result<T>
  where
    B: Serialize + Sync,
    T: DeserializeOwned,
  {
    let response = self
      .http
      .post(format!("{}/auth/v1/{}", self.base_url, path))
      .headers(self.auth_headers()?)
      .query(query)
      .json(body)
      .send()
      .await?;
    let response = check_auth(response).await?;
    let bytes = response.bytes().await?;
    let parsed = serde_json::from_slice(&bytes)?;
    Ok(parsed)
  }

  /// Auth call whose success response carries no payload we care about
  /// (sign-out, recovery mail).
  #[instrument(name = "HttpTransport::auth_post_unit", skip_all, fields(path = %path), err(Display))]
  pub(crate) async fn auth_post_unit<B: Serialize + Sync>(
    &self,
    path: &str,
    query: &[(&str, &str)],
    body: &B,
  ) -> Result<()> {
    let response = self
      .http
      .post(format!("{}/auth/v1/{}", self.base_url, path))
      .headers(self.auth_headers()?)
      .query(query)
      .json(body)
      .send()
      .await?;
    check_auth(response).await?;
    Ok(())
  }

  // --- Storage objects ---

  pub(crate) fn public_object_url(&self, bucket: &str, path: &str) -> String {
    format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, path)
  }

  #[instrument(name = "HttpTransport::storage_upload", skip_all, fields(bucket = %bucket, path = %path), err(Display))]
  pub(crate) async fn storage_upload(
    &self,
    bucket: &str,
    path: &str,
    content_type: &str,
    bytes: Vec<u8>,
  ) -> Result<()> {
    let content_type = HeaderValue::from_str(content_type)
      .map_err(|_| StoreError::Storage { message: format!("Invalid content type '{}'", content_type) })?;
    let response = self
      .http
      .post(format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path))
      .headers(self.auth_headers()?)
      .header(CONTENT_TYPE, content_type)
      .header(CACHE_CONTROL, "max-age=3600")
      .body(bytes)
      .send()
      .await?;
    check_storage(response).await?;
    Ok(())
  }

  #[instrument(name = "HttpTransport::storage_remove", skip_all, fields(bucket = %bucket), err(Display))]
  pub(crate) async fn storage_remove(&self, bucket: &str, paths: &[&str]) -> Result<()> {
    let body = serde_json::json!({ "prefixes": paths });
    let response = self
      .http
      .delete(format!("{}/storage/v1/object/{}", self.base_url, bucket))
      .headers(self.auth_headers()?)
      .json(&body)
      .send()
      .await?;
    check_storage(response).await?;
    Ok(())
  }
}

// --- Failure decoding ---

// The three surfaces disagree on their error envelope; this covers all of
// them ("message" for rows/objects, "error_description"/"msg"/"error" for
// credentials).
#[derive(Deserialize)]
struct ErrorBody {
  message: Option<String>,
  error_description: Option<String>,
  msg: Option<String>,
  error: Option<String>,
}

fn extract_message(body: &str, status: StatusCode) -> String {
  if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
    if let Some(message) = parsed
      .message
      .or(parsed.error_description)
      .or(parsed.msg)
      .or(parsed.error)
    {
      return message;
    }
  }
  let trimmed = body.trim();
  if trimmed.is_empty() {
    status.canonical_reason().unwrap_or("request failed").to_string()
  } else {
    let mut snippet: String = trimmed.chars().take(200).collect();
    if snippet.len() < trimmed.len() {
      snippet.push_str("...");
    }
    snippet
  }
}

async fn failure_message(response: Response) -> (u16, String) {
  let status = response.status();
  let body = response.text().await.unwrap_or_default();
  (status.as_u16(), extract_message(&body, status))
}

async fn check_rest(response: Response) -> Result<Response> {
  if response.status().is_success() {
    return Ok(response);
  }
  let (status, message) = failure_message(response).await;
  Err(StoreError::Api { status, message })
}

async fn check_auth(response: Response) -> Result<Response> {
  if response.status().is_success() {
    return Ok(response);
  }
  let (_, message) = failure_message(response).await;
  Err(StoreError::Auth { message })
}

async fn check_storage(response: Response) -> Result<Response> {
  if response.status().is_success() {
    return Ok(response);
  }
  let (_, message) = failure_message(response).await;
  Err(StoreError::Storage { message })
}

/// Pulls the total out of a `content-range` header such as `0-11/27` or
/// `*/0`. A `*` total means the backend did not count.
fn parse_exact_count(range: &str) -> Option<u64> {
  let total = range.rsplit('/').next()?;
  total.parse::<u64>().ok()
}
