// src/web/handlers/task_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Task, TaskStatus};
use crate::state::AppState;
use crate::web::session::SessionUser;

pub const TASKS_COLLECTION: &str = "tasks";

#[derive(Deserialize, Debug)]
pub struct TaskPayload {
  pub project_id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub assigned_to: Option<String>,
  pub start_date: Option<String>,
  pub end_date: Option<String>,
  pub priority: Option<String>,
  pub status: Option<TaskStatus>,
}

/// `POST /new-task` — create a task under a project; status defaults to
/// pending.
#[instrument(name = "handler::new_task", skip(app_state, payload, user), fields(user_id = %user.id))]
pub async fn new_task_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<TaskPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let t = payload.into_inner();

  if t.name.trim().is_empty() {
    return Err(AppError::Validation("Please fill in required fields".to_string()));
  }

  let task: Task = app_state
    .items
    .create(
      TASKS_COLLECTION,
      &json!({
        "project_id": t.project_id,
        "name": t.name,
        "description": t.description,
        "assigned_to": t.assigned_to,
        "start_date": t.start_date,
        "end_date": t.end_date,
        "priority": t.priority,
        "status": t.status.unwrap_or_default(),
        "user_id": user.id,
      }),
    )
    .await?;

  info!(task_id = %task.id, project_id = %task.project_id, "Task created");
  Ok(HttpResponse::Created().json(json!({
    "message": "Task created successfully",
    "task": task,
  })))
}

/// `POST /edit-task/{id}` — full-form task edit.
#[instrument(name = "handler::edit_task", skip(app_state, payload, user), fields(user_id = %user.id))]
pub async fn edit_task_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<TaskPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let task_id = path.into_inner();
  let t = payload.into_inner();

  if t.name.trim().is_empty() {
    return Err(AppError::Validation("Please fill in required fields".to_string()));
  }

  app_state
    .items
    .patch(
      TASKS_COLLECTION,
      task_id,
      &json!({
        "project_id": t.project_id,
        "name": t.name,
        "description": t.description,
        "assigned_to": t.assigned_to,
        "start_date": t.start_date,
        "end_date": t.end_date,
        "priority": t.priority,
        "status": t.status,
      }),
    )
    .await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Task updated successfully" })))
}

/// `PATCH /task/{id}` — partial update (e.g. drag-and-drop status changes);
/// fields are passed through to the items API as given.
#[instrument(name = "handler::patch_task", skip(app_state, payload, _user))]
pub async fn patch_task_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<serde_json::Value>,
  _user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let task_id = path.into_inner();
  app_state
    .items
    .patch(TASKS_COLLECTION, task_id, &payload.into_inner())
    .await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Task updated" })))
}

/// `DELETE /task/{id}`
#[instrument(name = "handler::delete_task", skip(app_state, _user))]
pub async fn delete_task_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  _user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let task_id = path.into_inner();
  app_state.items.delete(TASKS_COLLECTION, task_id).await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted" })))
}
