// src/services/cart_view.rs

use crate::errors::AppError;
use crate::models::Item;
use crate::money::Cents;
use crate::services::cart::CartStore;
use crate::services::catalog::CatalogAccess;
use serde::Serialize;
use tracing::{instrument, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct CartViewLine {
  pub order_id: Uuid,
  pub item: Item,
  pub quantity: i64,
  pub line_total: Cents,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct CartView {
  pub lines: Vec<CartViewLine>,
  pub grand_total: Cents,
}

impl CartView {
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

/// Joins the user's pending lines with catalog data into displayable line
/// items and a grand total.
///
/// An empty cart returns an empty view without touching the catalog. A line
/// whose item id no longer resolves (item deleted from the catalog) is
/// dropped from the view but left in the store; see DESIGN.md for the
/// orphan policy.
#[instrument(name = "cart_view::build", skip(cart, catalog))]
pub async fn build_cart_view(
  cart: &dyn CartStore,
  catalog: &dyn CatalogAccess,
  user_id: Uuid,
) -> Result<CartView, AppError> {
  let pending = cart.list_pending(user_id).await?;
  if pending.is_empty() {
    return Ok(CartView::default());
  }

  let item_ids: Vec<Uuid> = pending.iter().map(|line| line.product_id).collect();
  let items = catalog.items_by_ids(&item_ids).await?;

  let mut lines = Vec::with_capacity(pending.len());
  for order in pending {
    let Some(item) = items.get(&order.product_id) else {
      warn!(order_id = %order.id, product_id = %order.product_id, "Dropping orphaned cart line from view");
      continue;
    };
    let line_total = item.price.times(order.quantity);
    lines.push(CartViewLine {
      order_id: order.id,
      item: item.clone(),
      quantity: order.quantity,
      line_total,
    });
  }

  let grand_total = lines.iter().map(|l| l.line_total).sum();
  Ok(CartView { lines, grand_total })
}
