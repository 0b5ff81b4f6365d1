// src/models/item.rs

use crate::money::Cents;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable catalog entry from the `shop` collection.
///
/// Read-only from the cart's perspective. The price here is authoritative
/// at read time; the cart never caches a price snapshot and checkout
/// re-reads the current price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
  pub id: Uuid,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub price: Cents,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub subcategory: Option<String>,
  /// Asset references managed by the items API; opaque to this server.
  #[serde(default)]
  pub media: Vec<serde_json::Value>,
}
