// vitrine_core/src/client/ads.rs

use tracing::instrument;

use crate::client::query::{Direction, SelectQuery};
use crate::client::StoreClient;
use crate::error::Result;
use crate::model::Ad;

const TABLE: &str = "ads";

/// Promotional banner rows for the home carousel.
pub struct Ads<'a> {
  pub(crate) client: &'a StoreClient,
}

impl Ads<'_> {
  /// Every banner, in fixed id order so the carousel is stable between
  /// visits. Unconfigured clients see no banners.
  #[instrument(name = "Ads::list", skip_all, err(Display))]
  pub async fn list(&self) -> Result<Vec<Ad>> {
    let Some(transport) = self.client.transport() else {
      return Ok(Vec::new());
    };
    let query = SelectQuery::new()
      .columns("id,image_path,link")
      .order("id", Direction::Asc);
    transport.select(TABLE, query).await
  }
}
