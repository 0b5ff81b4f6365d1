// src/state.rs

use crate::config::AppConfig;
use crate::services::{CartStore, CatalogAccess};
use crate::store::ItemsClient;
use std::sync::Arc;

/// Shared application state, constructed once in `main` and handed to every
/// handler. The cart and catalog sit behind traits so tests can swap in
/// in-memory fakes.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub items: Arc<ItemsClient>,
  pub catalog: Arc<dyn CatalogAccess>,
  pub cart: Arc<dyn CartStore>,
}
