// tests/client_tests.rs
mod common;

use common::*;
use serial_test::serial;
use vitrine::client::{
  password_strength, strength_label, unique_object_name, BrowseFilter, Direction, SelectQuery,
  FALLBACK_PROFILE_IMAGE, MAX_UPLOAD_BYTES, PLACEHOLDER_IMAGE,
};
use vitrine::{StoreClient, StoreConfig, StoreError};

const BROWSE_SELECT: &str = "id,name,description,price,category_id,img_path,condition,location";

fn live_client() -> StoreClient {
  let config = StoreConfig::new("https://demo.supabase.co/", "anon-key").unwrap();
  StoreClient::new(config).unwrap()
}

fn params(query: SelectQuery) -> Vec<(String, String)> {
  query.into_params()
}

fn pair(key: &str, value: &str) -> (String, String) {
  (key.to_string(), value.to_string())
}

// --- Inert client semantics ---

#[tokio::test]
async fn test_inert_client_reads_come_back_empty() {
  setup_tracing();
  let client = StoreClient::inert();
  assert!(!client.is_configured());

  let page = client.products().browse(&BrowseFilter::all(), 0, 12).await.unwrap();
  assert!(page.is_empty());
  assert!(client.ads().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inert_client_single_reads_are_not_found() {
  setup_tracing();
  let client = StoreClient::inert();

  match client.products().by_id(99).await {
    Err(StoreError::NotFound { what }) => assert_eq!(what, "product 99"),
    other => panic!("Expected StoreError::NotFound, got {:?}", other),
  }
}

#[tokio::test]
async fn test_inert_client_writes_fail_with_config_error() {
  setup_tracing();
  let client = StoreClient::inert();

  match client.products().create(&valid_listing()).await {
    Err(StoreError::Config(message)) => assert!(message.contains("publish a product")),
    other => panic!("Expected StoreError::Config, got {:?}", other),
  }
  assert!(matches!(client.products().mine().await, Err(StoreError::Config(_))));
  assert!(matches!(
    client.products().delete(1).await,
    Err(StoreError::Config(_))
  ));
}

#[tokio::test]
async fn test_inert_client_auth_surface() {
  setup_tracing();
  let client = StoreClient::inert();

  assert!(!client.auth().is_signed_in());
  assert!(client.auth().session().is_none());
  // Signing out with nothing to revoke is a quiet no-op.
  client.auth().sign_out().await.unwrap();

  assert!(matches!(
    client.auth().sign_in("seller@example.com", "pw").await,
    Err(StoreError::Config(_))
  ));
}

#[tokio::test]
async fn test_inert_storage_urls_fall_back_to_placeholders() {
  setup_tracing();
  let client = StoreClient::inert();
  let storage = client.storage();

  assert_eq!(storage.product_image_url(None), PLACEHOLDER_IMAGE);
  assert_eq!(storage.product_image_url(Some("x.jpg")), PLACEHOLDER_IMAGE);
  assert_eq!(storage.seller_profile_url(None), FALLBACK_PROFILE_IMAGE);
  assert_eq!(storage.public_url("products", ""), "");
}

#[tokio::test]
#[serial]
async fn test_from_env_without_credentials_degrades_to_inert() {
  setup_tracing();
  std::env::remove_var("SUPABASE_URL");
  std::env::remove_var("SUPABASE_ANON_KEY");

  let client = StoreClient::from_env();
  assert!(!client.is_configured());
}

// --- Live client, no network required ---

#[tokio::test]
async fn test_live_client_renders_public_urls() {
  setup_tracing();
  let client = live_client(); // Note: trailing slash in the URL is trimmed

  assert_eq!(
    client.storage().public_url("products", "folder/a.jpg"),
    "https://demo.supabase.co/storage/v1/object/public/products/folder/a.jpg"
  );
  assert_eq!(
    client.storage().product_image_url(Some("a.jpg")),
    "https://demo.supabase.co/storage/v1/object/public/products/a.jpg"
  );
  assert_eq!(client.storage().product_image_url(None), PLACEHOLDER_IMAGE);
  assert_eq!(
    client.storage().ad_image_url("banner.png"),
    "https://demo.supabase.co/storage/v1/object/public/ads/banner.png"
  );
}

#[tokio::test]
async fn test_seller_reads_require_a_session() {
  setup_tracing();
  let client = live_client();

  match client.products().mine().await {
    Err(StoreError::Auth { message }) => {
      assert_eq!(message, "You are not authenticated. Please log in again.")
    }
    other => panic!("Expected StoreError::Auth, got {:?}", other),
  }
  assert!(matches!(
    client.products().seller_stats().await,
    Err(StoreError::Auth { .. })
  ));
}

#[tokio::test]
async fn test_upload_validation_short_circuits_before_any_request() {
  setup_tracing();
  let client = live_client();
  let storage = client.storage();

  match storage.upload_image("products", "", "a.jpg", "image/jpeg", Vec::new()).await {
    Err(StoreError::Storage { message }) => assert_eq!(message, "No file provided"),
    other => panic!("Expected StoreError::Storage, got {:?}", other),
  }

  match storage.upload_image("products", "", "a.txt", "text/plain", vec![1]).await {
    Err(StoreError::Storage { message }) => {
      assert_eq!(message, "Invalid file type. Please upload a JPEG, PNG, WebP, or GIF image.")
    }
    other => panic!("Expected StoreError::Storage, got {:?}", other),
  }

  let oversized = vec![0u8; MAX_UPLOAD_BYTES + 1];
  match storage.upload_image("products", "", "a.jpg", "image/jpeg", oversized).await {
    Err(StoreError::Storage { message }) => {
      assert_eq!(message, "File size too large. Maximum size is 5MB.")
    }
    other => panic!("Expected StoreError::Storage, got {:?}", other),
  }
}

#[tokio::test]
async fn test_upload_on_inert_client_is_a_config_error() {
  setup_tracing();
  let client = StoreClient::inert();

  assert!(matches!(
    client
      .storage()
      .upload_image("products", "", "a.jpg", "image/jpeg", vec![1, 2, 3])
      .await,
    Err(StoreError::Config(_))
  ));
}

// --- Generated object names ---

#[test]
fn test_unique_object_names_keep_extension_and_differ() {
  let name = unique_object_name("photo.v2.JPG");
  assert!(name.ends_with(".JPG"));
  let stem = name.strip_suffix(".JPG").unwrap();
  let (millis, suffix) = stem.rsplit_once('-').unwrap();
  assert!(millis.parse::<i64>().is_ok());
  assert_eq!(suffix.len(), 7);

  assert_ne!(unique_object_name("photo.jpg"), unique_object_name("photo.jpg"));

  // A name with no dot contributes itself as the extension.
  assert!(unique_object_name("README").ends_with(".README"));
}

// --- Query rendering ---

#[test]
fn test_browse_query_rendering_for_the_whole_catalog() {
  assert_eq!(
    params(BrowseFilter::all().to_query(0, 12)),
    vec![
      pair("select", BROWSE_SELECT),
      pair("order", "id.desc"),
      pair("limit", "12"),
      pair("offset", "0"),
    ]
  );
}

#[test]
fn test_browse_query_rendering_with_search_and_category() {
  let filter = BrowseFilter {
    category_id: Some(3),
    search: Some(" blue kettle ".to_string()),
    exclude_id: None,
  };
  assert_eq!(
    params(filter.to_query(12, 12)),
    vec![
      pair("select", BROWSE_SELECT),
      pair("category_id", "eq.3"),
      pair("or", "(name.ilike.*blue kettle*,description.ilike.*blue kettle*)"),
      pair("order", "id.desc"),
      pair("limit", "12"),
      pair("offset", "12"),
    ]
  );
}

#[test]
fn test_related_query_excludes_the_anchor_listing() {
  assert_eq!(
    params(BrowseFilter::related_to(3, 42).to_query(0, 4)),
    vec![
      pair("select", BROWSE_SELECT),
      pair("category_id", "eq.3"),
      pair("id", "neq.42"),
      pair("order", "id.desc"),
      pair("limit", "4"),
      pair("offset", "0"),
    ]
  );
}

#[test]
fn test_search_terms_drop_filter_grammar_characters() {
  assert_eq!(
    params(SelectQuery::new().search_any(&["name"], "a,(b) c")),
    vec![pair("or", "(name.ilike.*ab c*)")]
  );
}

#[test]
fn test_select_query_range_window_is_inclusive() {
  assert_eq!(
    params(SelectQuery::new().range(12, 23)),
    vec![pair("limit", "12"), pair("offset", "12")]
  );
}

#[test]
fn test_select_query_strips_whitespace_from_columns() {
  assert_eq!(
    params(SelectQuery::new().columns("id, name, price").order("name", Direction::Asc)),
    vec![pair("select", "id,name,price"), pair("order", "name.asc")]
  );
}

// --- Password strength meter ---

#[test]
fn test_password_strength_scores_one_point_per_criterion() {
  assert_eq!(password_strength(""), 0);
  assert_eq!(password_strength("abc"), 1); // lowercase only
  assert_eq!(password_strength("abcdefgh"), 2); // + length
  assert_eq!(password_strength("Abcd123"), 3); // lower, upper, digit; too short
  assert_eq!(password_strength("Abcdefg1"), 4);
  assert_eq!(password_strength("Abcdefg1!"), 5);
}

#[test]
fn test_strength_labels() {
  assert_eq!(strength_label(5), "Strong");
  assert_eq!(strength_label(4), "Strong");
  assert_eq!(strength_label(3), "Good");
  assert_eq!(strength_label(2), "Fair");
  assert_eq!(strength_label(1), "Weak");
  assert_eq!(strength_label(0), "Weak");
}
