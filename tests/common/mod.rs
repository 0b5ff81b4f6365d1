// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use sitewise::errors::AppError;
use sitewise::models::{Item, Order, OrderStatus};
use sitewise::money::Cents;
use sitewise::services::{CartStore, CatalogAccess};
use sitewise::web::session::SessionUser;

pub fn test_user() -> SessionUser {
  SessionUser {
    id: Uuid::new_v4(),
    name: "Dana Smith".to_string(),
    email: "dana@example.com".to_string(),
    phone: None,
  }
}

pub fn test_item(name: &str, price: &str) -> Item {
  Item {
    id: Uuid::new_v4(),
    name: name.to_string(),
    description: None,
    price: Cents::from_decimal_str(price).unwrap(),
    category: None,
    subcategory: None,
    media: Vec::new(),
  }
}

/// In-memory `CatalogAccess` double. Counts lookups so tests can assert the
/// empty-cart short-circuit never touches the catalog.
#[derive(Default)]
pub struct InMemoryCatalog {
  items: Mutex<HashMap<Uuid, Item>>,
  pub lookup_calls: AtomicUsize,
}

impl InMemoryCatalog {
  pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
    let catalog = Self::default();
    {
      let mut guard = catalog.items.lock().unwrap();
      for item in items {
        guard.insert(item.id, item);
      }
    }
    catalog
  }

  pub fn lookups(&self) -> usize {
    self.lookup_calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CatalogAccess for InMemoryCatalog {
  async fn items_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Item>, AppError> {
    self.lookup_calls.fetch_add(1, Ordering::SeqCst);
    let guard = self.items.lock().unwrap();
    Ok(
      ids
        .iter()
        .filter_map(|id| guard.get(id).cloned().map(|item| (*id, item)))
        .collect(),
    )
  }

  async fn list_items(&self, limit: Option<u32>) -> Result<Vec<Item>, AppError> {
    let guard = self.items.lock().unwrap();
    let mut items: Vec<Item> = guard.values().cloned().collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));
    if let Some(limit) = limit {
      items.truncate(limit as usize);
    }
    Ok(items)
  }
}

/// In-memory `CartStore` double holding order rows in insertion order.
///
/// `fail_complete_for` simulates a per-line store fault during checkout
/// without disturbing the other lines.
#[derive(Default)]
pub struct InMemoryCartStore {
  orders: Mutex<Vec<Order>>,
  fail_complete_for: Mutex<HashSet<Uuid>>,
}

impl InMemoryCartStore {
  pub fn fail_complete_of(&self, order_id: Uuid) {
    self.fail_complete_for.lock().unwrap().insert(order_id);
  }

  pub fn clear_faults(&self) {
    self.fail_complete_for.lock().unwrap().clear();
  }

  pub fn order_count(&self) -> usize {
    self.orders.lock().unwrap().len()
  }

  pub fn order(&self, order_id: Uuid) -> Option<Order> {
    self.orders.lock().unwrap().iter().find(|o| o.id == order_id).cloned()
  }

  pub fn all_orders(&self) -> Vec<Order> {
    self.orders.lock().unwrap().clone()
  }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
  async fn add_or_increment(&self, user_id: Uuid, item_id: Uuid, quantity: i64) -> Result<Order, AppError> {
    if quantity < 1 {
      return Err(AppError::Validation("Quantity must be a positive number.".to_string()));
    }
    let mut guard = self.orders.lock().unwrap();
    if let Some(line) = guard
      .iter_mut()
      .find(|o| o.user_id == user_id && o.product_id == item_id && o.status == OrderStatus::Pending)
    {
      line.quantity += quantity;
      return Ok(line.clone());
    }
    let line = Order {
      id: Uuid::new_v4(),
      user_id,
      product_id: item_id,
      quantity,
      status: OrderStatus::Pending,
      amount_paid: None,
      payment_message: None,
      created_at: None,
      updated_at: None,
      delivered_at: None,
    };
    guard.push(line.clone());
    Ok(line)
  }

  async fn set_quantity(&self, user_id: Uuid, order_id: Uuid, quantity: i64) -> Result<(), AppError> {
    let mut guard = self.orders.lock().unwrap();
    if quantity <= 0 {
      // Removing an absent line succeeds silently.
      guard.retain(|o| !(o.id == order_id && o.user_id == user_id));
      return Ok(());
    }
    match guard.iter_mut().find(|o| o.id == order_id && o.user_id == user_id) {
      Some(line) => {
        line.quantity = quantity;
        Ok(())
      }
      None => Err(AppError::NotFound("Cart line not found".to_string())),
    }
  }

  async fn list_pending(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
    let guard = self.orders.lock().unwrap();
    Ok(
      guard
        .iter()
        .filter(|o| o.user_id == user_id && o.status == OrderStatus::Pending)
        .cloned()
        .collect(),
    )
  }

  async fn complete(
    &self,
    user_id: Uuid,
    order_id: Uuid,
    amount_paid: Cents,
    payment_message: &str,
  ) -> Result<(), AppError> {
    if self.fail_complete_for.lock().unwrap().contains(&order_id) {
      return Err(AppError::Internal("simulated store failure".to_string()));
    }
    let mut guard = self.orders.lock().unwrap();
    let line = guard
      .iter_mut()
      .find(|o| o.id == order_id && o.user_id == user_id)
      .ok_or_else(|| AppError::NotFound(format!("order {} not found", order_id)))?;
    line.status = OrderStatus::Complete;
    line.amount_paid = Some(amount_paid);
    line.payment_message = Some(payment_message.to_string());
    Ok(())
  }
}
