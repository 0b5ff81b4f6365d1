// src/models/team.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team invitation row. `status` starts at `pending` and is flipped to
/// `accepted` or `declined` by the invitee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInvite {
  pub id: Uuid,
  pub project_id: Uuid,
  pub email: String,
  pub role: String,
  pub invited_by: Uuid,
  pub status: String,
}
