// src/models/project.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
  pub id: Uuid,
  pub user_id: Uuid,
  pub name: String,
  #[serde(rename = "type")]
  pub project_type: String,
  #[serde(default)]
  pub client_name: Option<String>,
  #[serde(default)]
  pub client_contact: Option<String>,
  pub location: String,
  #[serde(default)]
  pub description: Option<String>,
  pub budget: f64,
  pub start_date: String,
  #[serde(default)]
  pub deadline: Option<String>,
  #[serde(default)]
  pub materials: Option<String>,
  #[serde(default)]
  pub contractors: Option<String>,
  #[serde(default)]
  pub permits: Option<String>,
  #[serde(default)]
  pub safety: Option<String>,
  #[serde(default)]
  pub media: Vec<serde_json::Value>,
  /// false while the project is active; flipped by the owner when done.
  #[serde(default)]
  pub status: bool,
}
