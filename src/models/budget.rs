// src/models/budget.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
  pub id: Uuid,
  pub user_id: Uuid,
  pub project_id: Uuid,
  /// Stored camelCased in the collection.
  #[serde(rename = "totalBudget")]
  pub total_budget: f64,
  /// Free-form component breakdown rows, passed through untouched.
  #[serde(default)]
  pub components: serde_json::Value,
}
