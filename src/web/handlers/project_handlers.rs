// src/web/handlers/project_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::Project;
use crate::state::AppState;
use crate::web::session::SessionUser;

pub const PROJECTS_COLLECTION: &str = "projects";

#[derive(Deserialize, Debug)]
pub struct NewProjectPayload {
  pub name: String,
  #[serde(rename = "type")]
  pub project_type: String,
  pub client_name: Option<String>,
  pub client_contact: Option<String>,
  pub location: String,
  pub description: Option<String>,
  pub budget: f64,
  pub start_date: String,
  pub end_date: Option<String>,
  pub materials: Option<String>,
  pub contractors: Option<String>,
  pub permits: Option<String>,
  pub safety: Option<String>,
}

/// `POST /new-project` — create a project owned by the session user.
/// Attachment upload is handled by the items API directly and is out of
/// scope here.
#[instrument(name = "handler::new_project", skip(app_state, payload, user), fields(user_id = %user.id))]
pub async fn new_project_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewProjectPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let p = payload.into_inner();

  if p.name.trim().is_empty() || p.project_type.trim().is_empty() || p.location.trim().is_empty() || p.start_date.trim().is_empty() {
    return Err(AppError::Validation(
      "Please fill in all required fields".to_string(),
    ));
  }

  let project: Project = app_state
    .items
    .create(
      PROJECTS_COLLECTION,
      &json!({
        "name": p.name,
        "type": p.project_type,
        "client_name": p.client_name,
        "client_contact": p.client_contact,
        "location": p.location,
        "description": p.description,
        "budget": p.budget,
        "start_date": p.start_date,
        "deadline": p.end_date,
        "materials": p.materials,
        "contractors": p.contractors,
        "permits": p.permits,
        "safety": p.safety,
        "status": false,
        "user_id": user.id,
      }),
    )
    .await?;

  info!(project_id = %project.id, "Project created");
  Ok(HttpResponse::Created().json(json!({
    "message": "Project created successfully",
    "project": project,
  })))
}
