// vitrine_core/src/client/products.rs

//! Catalog reads and seller-side listing management.

use tracing::{event, instrument, Level};
use uuid::Uuid;

use serde::Serialize;

use crate::client::query::{Direction, SelectQuery};
use crate::client::StoreClient;
use crate::error::{Result, StoreError};
use crate::model::category::CATEGORIES;
use crate::model::{NewProduct, Product, ProductSummary, SellerStats};

const TABLE: &str = "products";

// Browse pages deliberately skip the seller columns and timestamp.
const BROWSE_COLUMNS: &str = "id,name,description,price,category_id,img_path,condition,location";
const SUMMARY_COLUMNS: &str = "id,name,price,category_id,created_at";

/// What a browse page is filtered by. The default selects the whole catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseFilter {
  pub category_id: Option<i64>,
  pub search: Option<String>,
  pub exclude_id: Option<i64>,
}

impl BrowseFilter {
  pub fn all() -> Self {
    Self::default()
  }

  pub fn category(category_id: i64) -> Self {
    BrowseFilter {
      category_id: Some(category_id),
      ..Self::default()
    }
  }

  pub fn search(term: impl Into<String>) -> Self {
    BrowseFilter {
      search: Some(term.into()),
      ..Self::default()
    }
  }

  /// Listings that share a category with `product_id` but exclude it, for
  /// "more like this" rails under a detail view.
  pub fn related_to(category_id: i64, product_id: i64) -> Self {
    BrowseFilter {
      category_id: Some(category_id),
      exclude_id: Some(product_id),
      ..Self::default()
    }
  }

  /// Renders this filter plus a row window as the REST query for one browse
  /// page: trimmed columns, newest-first by id.
  pub fn to_query(&self, offset: usize, limit: usize) -> SelectQuery {
    let mut query = SelectQuery::new().columns(BROWSE_COLUMNS);
    if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
      query = query.search_any(&["name", "description"], term);
    }
    if let Some(category_id) = self.category_id {
      query = query.eq("category_id", category_id);
    }
    if let Some(excluded) = self.exclude_id {
      query = query.neq("id", excluded);
    }
    query
      .order("id", Direction::Desc)
      .range(offset, offset + limit.max(1) - 1)
  }
}

// Form fields plus the seller stamp derived from the session.
#[derive(Serialize)]
struct ListingRow<'a> {
  #[serde(flatten)]
  fields: &'a NewProduct,
  seller_id: Uuid,
}

/// Catalog surface of the client. Browsing needs no session; creating,
/// editing and retiring listings do.
pub struct Products<'a> {
  pub(crate) client: &'a StoreClient,
}

impl Products<'_> {
  /// One browse page. On an unconfigured client this returns an empty page,
  /// which readers treat as an exhausted catalog.
  #[instrument(name = "Products::browse", skip_all, fields(offset = offset, limit = limit), err(Display))]
  pub async fn browse(&self, filter: &BrowseFilter, offset: usize, limit: usize) -> Result<Vec<Product>> {
    let Some(transport) = self.client.transport() else {
      return Ok(Vec::new());
    };
    if limit == 0 {
      return Ok(Vec::new());
    }
    transport.select(TABLE, filter.to_query(offset, limit)).await
  }

  /// The full row for one listing.
  #[instrument(name = "Products::by_id", skip_all, fields(product_id = id), err(Display))]
  pub async fn by_id(&self, id: i64) -> Result<Product> {
    let not_found = || StoreError::NotFound {
      what: format!("product {}", id),
    };
    let Some(transport) = self.client.transport() else {
      return Err(not_found());
    };
    let query = SelectQuery::new().columns("*").eq("id", id);
    transport
      .select_one(TABLE, query)
      .await
      .map_err(|e| match e {
        StoreError::NotFound { .. } => not_found(),
        other => other,
      })
  }

  /// All listings owned by the signed-in seller, newest first.
  #[instrument(name = "Products::mine", skip_all, err(Display))]
  pub async fn mine(&self) -> Result<Vec<Product>> {
    let transport = self.client.transport_or_err("list your products")?;
    let session = self.client.require_session()?;
    let query = SelectQuery::new()
      .columns("*")
      .eq("seller_id", session.user_id)
      .order("created_at", Direction::Desc);
    transport.select(TABLE, query).await
  }

  /// Dashboard numbers for the signed-in seller: listing count, catalog
  /// breadth and the five most recent listings.
  #[instrument(name = "Products::seller_stats", skip_all, err(Display))]
  pub async fn seller_stats(&self) -> Result<SellerStats> {
    let transport = self.client.transport_or_err("load your dashboard")?;
    let session = self.client.require_session()?;

    let count_query = SelectQuery::new().columns("id").eq("seller_id", session.user_id);
    let total_products = transport.count_exact(TABLE, count_query).await?;

    let recent_query = SelectQuery::new()
      .columns(SUMMARY_COLUMNS)
      .eq("seller_id", session.user_id)
      .order("created_at", Direction::Desc)
      .limit(5);
    let recent: Vec<ProductSummary> = transport.select(TABLE, recent_query).await?;

    Ok(SellerStats {
      total_products,
      total_categories: CATEGORIES.len(),
      recent,
    })
  }

  /// Publishes a new listing for the signed-in seller and returns the
  /// created row.
  #[instrument(name = "Products::create", skip_all, err(Display))]
  pub async fn create(&self, listing: &NewProduct) -> Result<Product> {
    let transport = self.client.transport_or_err("publish a product")?;
    let session = self.client.require_session()?;
    listing.validate().map_err(StoreError::Validation)?;

    let normalized = listing.normalized();
    let row = ListingRow {
      fields: &normalized,
      seller_id: session.user_id,
    };
    let mut created: Vec<Product> = transport.insert_returning(TABLE, &row).await?;
    created.pop().ok_or_else(|| StoreError::Internal {
      source: anyhow::anyhow!("Insert returned no representation"),
    })
  }

  /// Rewrites an existing listing. The row must belong to the signed-in
  /// seller; the update itself is also scoped to the seller id so a stale
  /// ownership read cannot widen it.
  #[instrument(name = "Products::update", skip_all, fields(product_id = id), err(Display))]
  pub async fn update(&self, id: i64, changes: &NewProduct) -> Result<()> {
    let transport = self.client.transport_or_err("edit a product")?;
    let session = self.client.require_session()?;
    changes.validate().map_err(StoreError::Validation)?;

    let current = self.by_id(id).await?;
    if current.seller_id != Some(session.user_id) {
      return Err(StoreError::Forbidden {
        message: format!("product {} belongs to a different seller", id),
      });
    }

    let target = SelectQuery::new().eq("id", id).eq("seller_id", session.user_id);
    transport.update_where(TABLE, target, &changes.normalized()).await
  }

  /// Deletes a listing owned by the signed-in seller.
  #[instrument(name = "Products::delete", skip_all, fields(product_id = id), err(Display))]
  pub async fn delete(&self, id: i64) -> Result<()> {
    let transport = self.client.transport_or_err("delete a product")?;
    let session = self.client.require_session()?;

    let current = self.by_id(id).await?;
    if current.seller_id != Some(session.user_id) {
      return Err(StoreError::Forbidden {
        message: format!("product {} belongs to a different seller", id),
      });
    }

    let target = SelectQuery::new().eq("id", id).eq("seller_id", session.user_id);
    transport.delete_where(TABLE, target).await
  }

  /// Deletes a listing and, best effort, its stored image. A failed image
  /// removal leaves an orphaned object but never blocks the delete.
  #[instrument(name = "Products::remove_listing", skip_all, fields(product_id = product.id), err(Display))]
  pub async fn remove_listing(&self, product: &Product) -> Result<()> {
    if let Some(path) = product.img_path.as_deref() {
      if let Err(e) = self.client.storage().remove_product_image(path).await {
        event!(Level::WARN, error = %e, path = %path, "Could not remove listing image; continuing with delete.");
      }
    }
    self.delete(product.id).await
  }
}
