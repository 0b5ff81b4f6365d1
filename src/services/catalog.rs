// src/services/catalog.rs

use crate::errors::AppError;
use crate::models::Item;
use crate::store::{ItemsClient, Query};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Collection holding the purchasable catalog.
pub const SHOP_COLLECTION: &str = "shop";

/// Read-only lookups of purchasable items, used by cart view and checkout.
#[async_trait]
pub trait CatalogAccess: Send + Sync {
  /// Resolves a set of item ids to the items that still exist.
  ///
  /// Ids not found are silently omitted; a missing id never fails the whole
  /// call. An empty input short-circuits to an empty result without
  /// querying the store.
  async fn items_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Item>, AppError>;

  /// Lists catalog items, optionally capped.
  async fn list_items(&self, limit: Option<u32>) -> Result<Vec<Item>, AppError>;
}

/// `CatalogAccess` over the items API `shop` collection.
pub struct ShopCatalog {
  client: Arc<ItemsClient>,
}

impl ShopCatalog {
  pub fn new(client: Arc<ItemsClient>) -> Self {
    Self { client }
  }
}

#[async_trait]
impl CatalogAccess for ShopCatalog {
  #[instrument(name = "catalog::items_by_ids", skip(self, ids), fields(id_count = ids.len()))]
  async fn items_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Item>, AppError> {
    // An empty `_in` filter is a malformed query; never issue it.
    if ids.is_empty() {
      return Ok(HashMap::new());
    }

    let mut distinct: Vec<Uuid> = ids.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    let query = Query::new().is_in("id", distinct.iter());
    let items: Vec<Item> = self
      .client
      .list(SHOP_COLLECTION, &query)
      .await
      .map_err(|e| AppError::CatalogUnavailable(e.to_string()))?;

    info!(requested = distinct.len(), resolved = items.len(), "Resolved catalog items");
    Ok(items.into_iter().map(|item| (item.id, item)).collect())
  }

  #[instrument(name = "catalog::list_items", skip(self))]
  async fn list_items(&self, limit: Option<u32>) -> Result<Vec<Item>, AppError> {
    let mut query = Query::new();
    if let Some(limit) = limit {
      query = query.limit(limit);
    }
    self
      .client
      .list(SHOP_COLLECTION, &query)
      .await
      .map_err(|e| AppError::CatalogUnavailable(e.to_string()))
  }
}
