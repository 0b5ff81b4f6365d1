// src/services/cart.rs

use crate::errors::AppError;
use crate::models::Order;
use crate::money::Cents;
use crate::store::{ItemsClient, Query};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Collection holding cart lines and finalized orders alike.
pub const ORDERS_COLLECTION: &str = "orders";

/// The set of a user's not-yet-finalized order lines.
///
/// State machine per (user, item): `absent → pending(qty) → {pending(qty') |
/// absent}`. At most one pending line exists per (user, item); adds to an
/// existing item adjust quantity in place instead of duplicating. No
/// cross-request locking is provided: concurrent edits of the same line are
/// last-write-wins, which is acceptable for a single-user-editable resource.
#[async_trait]
pub trait CartStore: Send + Sync {
  /// Creates a pending line with `quantity`, or increments the existing
  /// line for (user, item) by `quantity`. Returns the resulting line.
  async fn add_or_increment(&self, user_id: Uuid, item_id: Uuid, quantity: i64) -> Result<Order, AppError>;

  /// Overwrites a line's quantity. A quantity of zero or less deletes the
  /// line; deleting an already-absent line succeeds silently. Only a line
  /// owned by `user_id` is touched: a positive quantity for someone else's
  /// line (or an unknown id) is `NotFound`.
  async fn set_quantity(&self, user_id: Uuid, order_id: Uuid, quantity: i64) -> Result<(), AppError>;

  /// All pending lines for the user, in store-insertion order.
  async fn list_pending(&self, user_id: Uuid) -> Result<Vec<Order>, AppError>;

  /// Finalizes one line: sets `status=complete` together with `amount_paid`
  /// and `payment_message`. Used only by checkout.
  async fn complete(
    &self,
    user_id: Uuid,
    order_id: Uuid,
    amount_paid: Cents,
    payment_message: &str,
  ) -> Result<(), AppError>;
}

/// `CartStore` over the items API `orders` collection.
///
/// Ownership of write targets is trusted to the session-scoped handlers;
/// the items API has no per-user credential to enforce it again.
pub struct PendingOrderStore {
  client: Arc<ItemsClient>,
}

impl PendingOrderStore {
  pub fn new(client: Arc<ItemsClient>) -> Self {
    Self { client }
  }

  async fn find_pending_line(&self, user_id: Uuid, item_id: Uuid) -> Result<Option<Order>, AppError> {
    let query = Query::new()
      .eq("user_id", user_id)
      .eq("product_id", item_id)
      .eq("status", "pending");
    let mut lines: Vec<Order> = self.client.list(ORDERS_COLLECTION, &query).await?;
    if lines.len() > 1 {
      // A double-click race can leave duplicates behind; merge on the first
      // line and let the others be edited away by the user.
      warn!(%user_id, %item_id, count = lines.len(), "Multiple pending lines for one item");
    }
    Ok(if lines.is_empty() { None } else { Some(lines.remove(0)) })
  }
}

#[async_trait]
impl CartStore for PendingOrderStore {
  #[instrument(name = "cart::add_or_increment", skip(self))]
  async fn add_or_increment(&self, user_id: Uuid, item_id: Uuid, quantity: i64) -> Result<Order, AppError> {
    if quantity < 1 {
      return Err(AppError::Validation("Quantity must be a positive number.".to_string()));
    }

    match self.find_pending_line(user_id, item_id).await? {
      Some(mut line) => {
        let new_quantity = line.quantity.saturating_add(quantity);
        self
          .client
          .patch(ORDERS_COLLECTION, line.id, &json!({ "units": new_quantity }))
          .await?;
        line.quantity = new_quantity;
        info!(order_id = %line.id, new_quantity, "Incremented existing cart line");
        Ok(line)
      }
      None => {
        let payload = json!({
          "user_id": user_id,
          "product_id": item_id,
          "status": "pending",
          "units": quantity,
        });
        let line: Order = self.client.create(ORDERS_COLLECTION, &payload).await?;
        info!(order_id = %line.id, quantity, "Created new cart line");
        Ok(line)
      }
    }
  }

  #[instrument(name = "cart::set_quantity", skip(self))]
  async fn set_quantity(&self, user_id: Uuid, order_id: Uuid, quantity: i64) -> Result<(), AppError> {
    // The items API is called with one process-wide credential, so the
    // ownership check has to happen here before the write.
    let query = Query::new().eq("id", order_id).eq("user_id", user_id);
    let mut lines: Vec<Order> = self.client.list(ORDERS_COLLECTION, &query).await?;
    let Some(line) = lines.pop() else {
      if quantity <= 0 {
        // Already gone, or never this user's line; removal stays idempotent.
        return Ok(());
      }
      return Err(AppError::NotFound("Cart line not found".to_string()));
    };

    if quantity <= 0 {
      // Delete, not a stored zero.
      self.client.delete(ORDERS_COLLECTION, line.id).await?;
      info!(%order_id, "Removed cart line");
    } else {
      self
        .client
        .patch(ORDERS_COLLECTION, line.id, &json!({ "units": quantity }))
        .await?;
      info!(%order_id, quantity, "Updated cart line quantity");
    }
    Ok(())
  }

  #[instrument(name = "cart::list_pending", skip(self))]
  async fn list_pending(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
    let query = Query::new().eq("user_id", user_id).eq("status", "pending");
    let lines = self.client.list(ORDERS_COLLECTION, &query).await?;
    Ok(lines)
  }

  #[instrument(name = "cart::complete", skip(self, payment_message))]
  async fn complete(
    &self,
    _user_id: Uuid,
    order_id: Uuid,
    amount_paid: Cents,
    payment_message: &str,
  ) -> Result<(), AppError> {
    self
      .client
      .patch(
        ORDERS_COLLECTION,
        order_id,
        &json!({
          "status": "complete",
          "amount_paid": amount_paid,
          "payment_message": payment_message,
        }),
      )
      .await?;
    info!(%order_id, %amount_paid, "Finalized order line");
    Ok(())
  }
}
