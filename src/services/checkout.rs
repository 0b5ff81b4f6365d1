// src/services/checkout.rs

use crate::errors::AppError;
use crate::money::Cents;
use crate::services::cart::CartStore;
use crate::services::catalog::CatalogAccess;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct CompletedLine {
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub item_name: String,
  pub quantity: i64,
  pub amount_paid: Cents,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedLine {
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub reason: String,
}

/// Per-line result of a checkout. No cross-line transaction exists in the
/// backing store, so callers get the exact split instead of one boolean and
/// can render an accurate partial-success message.
#[derive(Debug, Clone, Serialize, Default)]
pub struct CheckoutOutcome {
  pub completed: Vec<CompletedLine>,
  pub failed: Vec<FailedLine>,
  pub total_paid: Cents,
}

impl CheckoutOutcome {
  pub fn is_partial(&self) -> bool {
    !self.failed.is_empty()
  }
}

/// Converts the user's pending cart into finalized orders.
///
/// Each line is finalized independently and sequentially: `amount_paid =
/// price × quantity` at the price current right now, `status=complete`,
/// `payment_message = "paid by <user name>"`. Lines already completed are
/// never rolled back when a later line fails; still-pending lines simply
/// remain in the cart view, so re-invoking checkout processes only the
/// remainder. Returns `EmptyCart` for an empty cart (no side effects) and
/// `CheckoutFailed` when every line failed (cart unchanged).
#[instrument(name = "checkout::run", skip(cart, catalog, user_name))]
pub async fn checkout(
  cart: &dyn CartStore,
  catalog: &dyn CatalogAccess,
  user_id: Uuid,
  user_name: &str,
) -> Result<CheckoutOutcome, AppError> {
  let pending = cart.list_pending(user_id).await?;
  if pending.is_empty() {
    return Err(AppError::EmptyCart);
  }

  let item_ids: Vec<Uuid> = pending.iter().map(|line| line.product_id).collect();
  let items = catalog.items_by_ids(&item_ids).await?;

  let payment_message = format!("paid by {}", user_name);
  let line_count = pending.len();
  let mut outcome = CheckoutOutcome::default();

  for order in pending {
    let Some(item) = items.get(&order.product_id) else {
      // The line cannot be priced without its catalog entry; report it
      // instead of guessing an amount.
      warn!(order_id = %order.id, product_id = %order.product_id, "Cannot price orphaned line");
      outcome.failed.push(FailedLine {
        order_id: order.id,
        product_id: order.product_id,
        reason: "item no longer in catalog".to_string(),
      });
      continue;
    };

    let amount_paid = item.price.times(order.quantity);
    match cart.complete(user_id, order.id, amount_paid, &payment_message).await {
      Ok(()) => {
        outcome.total_paid = outcome.total_paid + amount_paid;
        outcome.completed.push(CompletedLine {
          order_id: order.id,
          product_id: order.product_id,
          item_name: item.name.clone(),
          quantity: order.quantity,
          amount_paid,
        });
      }
      Err(e) => {
        warn!(order_id = %order.id, error = %e, "Order line failed to finalize");
        outcome.failed.push(FailedLine {
          order_id: order.id,
          product_id: order.product_id,
          reason: e.to_string(),
        });
      }
    }
  }

  if outcome.completed.is_empty() {
    return Err(AppError::CheckoutFailed(format!(
      "all {} order lines failed to finalize",
      line_count
    )));
  }

  info!(
    completed = outcome.completed.len(),
    failed = outcome.failed.len(),
    total_paid = %outcome.total_paid,
    "Checkout finished"
  );
  Ok(outcome)
}
