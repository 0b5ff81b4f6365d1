// src/models/order.rs

use crate::money::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of an order row in the `orders` collection.
///
/// `pending` doubles as the cart representation: a pending order IS a cart
/// line, and the cart as a whole is the derived view "all orders for this
/// user with status=pending". `complete` is set only by checkout, atomically
/// with `amount_paid` and `payment_message`. `delivered` is set by an
/// external administrative process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Complete,
  Delivered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product_id: Uuid,
  /// The collection stores line quantity under `units`.
  #[serde(rename = "units")]
  pub quantity: i64,
  pub status: OrderStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub amount_paid: Option<Cents>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payment_message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub delivered_at: Option<DateTime<Utc>>,
}
