// src/web/handlers/budget_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Budget;
use crate::state::AppState;
use crate::web::session::SessionUser;

pub const BUDGETS_COLLECTION: &str = "budgets";

#[derive(Deserialize, Debug)]
pub struct CreateBudgetPayload {
  #[serde(rename = "projectId")]
  pub project_id: Uuid,
  #[serde(rename = "totalBudget")]
  pub total_budget: f64,
  pub components: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct EditBudgetPayload {
  pub project_id: Uuid,
  #[serde(rename = "totalBudget")]
  pub total_budget: f64,
  pub components: Option<Vec<serde_json::Value>>,
}

/// `POST /budget` — create a budget breakdown for a project.
#[instrument(name = "handler::create_budget", skip(app_state, payload, user), fields(user_id = %user.id))]
pub async fn create_budget_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CreateBudgetPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let b = payload.into_inner();

  if b.total_budget <= 0.0 {
    return Err(AppError::Validation("Invalid request data".to_string()));
  }

  let budget: Budget = app_state
    .items
    .create(
      BUDGETS_COLLECTION,
      &json!({
        "user_id": user.id,
        "project_id": b.project_id,
        "totalBudget": b.total_budget,
        "components": b.components,
      }),
    )
    .await?;

  info!(budget_id = %budget.id, project_id = %budget.project_id, "Budget created");
  Ok(HttpResponse::Created().json(json!({
    "message": "Budget created successfully",
    "budget": budget,
  })))
}

/// `POST /edit-budget/{id}`
#[instrument(name = "handler::edit_budget", skip(app_state, payload, user), fields(user_id = %user.id))]
pub async fn edit_budget_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<EditBudgetPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let budget_id = path.into_inner();
  let b = payload.into_inner();

  if b.total_budget <= 0.0 {
    return Err(AppError::Validation("Please fill in required fields".to_string()));
  }

  app_state
    .items
    .patch(
      BUDGETS_COLLECTION,
      budget_id,
      &json!({
        "project_id": b.project_id,
        "totalBudget": b.total_budget,
        "components": b.components,
      }),
    )
    .await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Budget updated successfully" })))
}

/// `DELETE /budget/{id}`
#[instrument(name = "handler::delete_budget", skip(app_state, _user))]
pub async fn delete_budget_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  _user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let budget_id = path.into_inner();
  app_state.items.delete(BUDGETS_COLLECTION, budget_id).await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Budget deleted" })))
}
