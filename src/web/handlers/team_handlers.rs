// src/web/handlers/team_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::TeamInvite;
use crate::state::AppState;
use crate::web::session::SessionUser;

pub const TEAMS_COLLECTION: &str = "teams";

#[derive(Deserialize, Debug)]
pub struct InviteMemberPayload {
  pub project_id: Uuid,
  pub email: String,
  pub role: String,
}

/// `POST /invite-member` — invite someone (by email) onto a project.
/// The invitation starts in `pending`; the invitee flips it via
/// `PATCH /team/{id}`.
#[instrument(name = "handler::invite_member", skip(app_state, payload, user), fields(user_id = %user.id))]
pub async fn invite_member_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<InviteMemberPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let p = payload.into_inner();

  if p.email.trim().is_empty() || p.role.trim().is_empty() {
    return Err(AppError::Validation(
      "Please fill in all required fields".to_string(),
    ));
  }

  let invite: TeamInvite = app_state
    .items
    .create(
      TEAMS_COLLECTION,
      &json!({
        "project_id": p.project_id,
        "email": p.email,
        "role": p.role,
        "invited_by": user.id,
        "status": "pending",
      }),
    )
    .await?;

  info!(invite_id = %invite.id, project_id = %invite.project_id, "Invitation sent");
  Ok(HttpResponse::Created().json(json!({ "message": "Invitation sent successfully" })))
}

/// `PATCH /team/{id}` — accept or decline an invitation, or adjust a role.
#[instrument(name = "handler::patch_team", skip(app_state, payload, _user))]
pub async fn patch_team_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<serde_json::Value>,
  _user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let team_id = path.into_inner();
  app_state
    .items
    .patch(TEAMS_COLLECTION, team_id, &payload.into_inner())
    .await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Team updated" })))
}
