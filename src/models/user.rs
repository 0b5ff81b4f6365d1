// src/models/user.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub phone: Option<String>,
  /// Argon2 hash, stored under the collection's `password` field.
  #[serde(skip_serializing)] // Never send password hash to client
  pub password: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile_image: Option<String>,
}
