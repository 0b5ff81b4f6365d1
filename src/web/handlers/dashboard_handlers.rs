// src/web/handlers/dashboard_handlers.rs

use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Budget, Order, Project, Task, TaskStatus, TeamInvite};
use crate::services::cart::ORDERS_COLLECTION;
use crate::store::Query;
use crate::state::AppState;
use crate::web::handlers::budget_handlers::BUDGETS_COLLECTION;
use crate::web::handlers::project_handlers::PROJECTS_COLLECTION;
use crate::web::handlers::task_handlers::TASKS_COLLECTION;
use crate::web::handlers::team_handlers::TEAMS_COLLECTION;
use crate::web::session::{redirect_to_login, SessionUser};

#[derive(Deserialize, Debug)]
pub struct OrdersQuery {
  pub status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ProjectRef {
  id: Uuid,
  name: String,
}

/// Labels for the current month and the five before it, oldest first,
/// formatted `YYYY-MM`.
fn last_six_months(now: DateTime<Utc>) -> Vec<String> {
  let current = now.year() * 12 + now.month0() as i32;
  (0..6)
    .rev()
    .map(|i| {
      let total = current - i;
      format!("{:04}-{:02}", total / 12, total % 12 + 1)
    })
    .collect()
}

fn month_label(at: DateTime<Utc>) -> String {
  format!("{:04}-{:02}", at.year(), at.month())
}

/// For each month label, each project's completion percentage: completed
/// tasks over tasks created that month, rendered with two decimals. A month
/// with no tasks for a project reads "0.00".
fn project_completion_by_month(labels: &[String], projects: &[(&str, &[Task])]) -> serde_json::Value {
  let mut by_month = serde_json::Map::new();
  for label in labels {
    let mut per_project = serde_json::Map::new();
    for (name, tasks) in projects {
      let created: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.created_at.map(month_label).as_deref() == Some(label.as_str()))
        .collect();
      let completed = created.iter().filter(|t| t.status == TaskStatus::Completed).count();
      let percent = if created.is_empty() {
        0.0
      } else {
        completed as f64 / created.len() as f64 * 100.0
      };
      per_project.insert((*name).to_string(), json!(format!("{:.2}", percent)));
    }
    by_month.insert(label.clone(), serde_json::Value::Object(per_project));
  }
  serde_json::Value::Object(by_month)
}

/// Orders for one or more statuses, each enriched with its catalog item.
/// Orders whose product is gone keep a null `product`.
async fn orders_with_products(
  app_state: &AppState,
  user_id: Uuid,
  statuses: &[&str],
) -> Result<Vec<serde_json::Value>, AppError> {
  let mut query = Query::new().eq("user_id", user_id);
  query = if statuses.len() == 1 {
    query.eq("status", statuses[0])
  } else {
    query.is_in("status", statuses.iter())
  };

  let orders: Vec<Order> = app_state.items.list(ORDERS_COLLECTION, &query).await?;
  if orders.is_empty() {
    return Ok(Vec::new());
  }

  let ids: Vec<Uuid> = orders.iter().map(|o| o.product_id).collect();
  let products = app_state.catalog.items_by_ids(&ids).await?;

  Ok(
    orders
      .into_iter()
      .map(|order| {
        let product = products.get(&order.product_id);
        json!({
          "order": order,
          "product": product,
        })
      })
      .collect(),
  )
}

/// `GET /dashboard` — the aggregate view model: projects with their tasks,
/// budgets, team invitations both directions, headline stats, task charts,
/// a shop preview and the user's ongoing/delivered orders.
///
/// Every section degrades independently to empty data on store failure;
/// the dashboard never answers a 5xx.
#[instrument(name = "handler::dashboard", skip(app_state, session))]
pub async fn dashboard_handler(app_state: web::Data<AppState>, session: Session) -> HttpResponse {
  let Some(user) = SessionUser::from_session(&session) else {
    return redirect_to_login();
  };

  let projects: Vec<Project> = app_state
    .items
    .list(PROJECTS_COLLECTION, &Query::new().eq("user_id", user.id))
    .await
    .unwrap_or_else(|e| {
      error!(error = %e, "Failed to fetch projects");
      Vec::new()
    });

  // Tasks per project, fetched sequentially; a failed project keeps an
  // empty task list.
  let mut tasks_by_project = Vec::with_capacity(projects.len());
  for project in &projects {
    let tasks: Vec<Task> = app_state
      .items
      .list(TASKS_COLLECTION, &Query::new().eq("project_id", project.id))
      .await
      .unwrap_or_else(|e| {
        error!(project_id = %project.id, error = %e, "Failed to fetch tasks for project");
        Vec::new()
      });
    tasks_by_project.push(tasks);
  }
  let projects_with_tasks: Vec<serde_json::Value> = projects
    .iter()
    .zip(&tasks_by_project)
    .map(|(project, tasks)| json!({ "project": project, "tasks": tasks }))
    .collect();

  let budgets: Vec<Budget> = app_state
    .items
    .list(BUDGETS_COLLECTION, &Query::new().eq("user_id", user.id))
    .await
    .unwrap_or_default();

  let all_tasks: Vec<Task> = app_state
    .items
    .list(TASKS_COLLECTION, &Query::new().eq("user_id", user.id))
    .await
    .unwrap_or_default();

  let mut teams_by_you: Vec<TeamInvite> = app_state
    .items
    .list(TEAMS_COLLECTION, &Query::new().eq("invited_by", user.id))
    .await
    .unwrap_or_default();

  let mut teams_invited_to: Vec<TeamInvite> = app_state
    .items
    .list(TEAMS_COLLECTION, &Query::new().eq("email", &user.email))
    .await
    .unwrap_or_default();

  // Enrich team rows with the project name they point at.
  let team_project_ids: HashSet<Uuid> = teams_by_you
    .iter()
    .chain(teams_invited_to.iter())
    .map(|t| t.project_id)
    .collect();
  let mut project_names: HashMap<Uuid, String> = HashMap::new();
  if !team_project_ids.is_empty() {
    let refs: Vec<ProjectRef> = app_state
      .items
      .list(
        PROJECTS_COLLECTION,
        &Query::new()
          .is_in("id", team_project_ids.iter())
          .fields(&["id", "name"]),
      )
      .await
      .unwrap_or_default();
    project_names = refs.into_iter().map(|p| (p.id, p.name)).collect();
  }
  let enrich = |teams: &mut Vec<TeamInvite>| -> Vec<serde_json::Value> {
    teams
      .drain(..)
      .map(|t| {
        let project_name = project_names.get(&t.project_id);
        json!({ "invite": t, "project_name": project_name })
      })
      .collect()
  };
  let teams_by_you = enrich(&mut teams_by_you);
  let teams_invited_to = enrich(&mut teams_invited_to);

  // Headline stats.
  let active_projects = projects.len();
  let tasks_due = all_tasks.iter().filter(|t| t.status != TaskStatus::Completed).count();
  let budget_spent: f64 = budgets.iter().map(|b| b.total_budget).sum();
  let team_members = teams_by_you
    .iter()
    .filter(|t| t["invite"]["status"] == "accepted")
    .count();
  let pending_notifications = teams_invited_to
    .iter()
    .filter(|t| t["invite"]["status"] == "pending")
    .count();

  let task_status_counts = json!({
    "pending": all_tasks.iter().filter(|t| t.status == TaskStatus::Pending).count(),
    "in_progress": all_tasks.iter().filter(|t| t.status == TaskStatus::InProgress).count(),
    "completed": all_tasks.iter().filter(|t| t.status == TaskStatus::Completed).count(),
  });

  // Completed tasks per month for the trailing six months.
  let labels = last_six_months(Utc::now());
  let mut completed_by_month: HashMap<String, u64> = HashMap::new();
  for task in all_tasks.iter().filter(|t| t.status == TaskStatus::Completed) {
    if let Some(created_at) = task.created_at {
      *completed_by_month.entry(month_label(created_at)).or_insert(0) += 1;
    }
  }
  let monthly_tasks_data: Vec<u64> = labels
    .iter()
    .map(|label| completed_by_month.get(label).copied().unwrap_or(0))
    .collect();

  // Per-project completion ratio over the same window, for the project
  // progress chart.
  let completion_input: Vec<(&str, &[Task])> = projects
    .iter()
    .zip(&tasks_by_project)
    .map(|(project, tasks)| (project.name.as_str(), tasks.as_slice()))
    .collect();
  let project_completion = project_completion_by_month(&labels, &completion_input);

  let shop_items = app_state.catalog.list_items(Some(4)).await.unwrap_or_else(|e| {
    error!(error = %e, "Failed to fetch shop preview");
    Vec::new()
  });

  let ongoing_orders = orders_with_products(&app_state, user.id, &["complete"])
    .await
    .unwrap_or_default();
  let delivered_orders = orders_with_products(&app_state, user.id, &["delivered"])
    .await
    .unwrap_or_default();

  HttpResponse::Ok().json(json!({
    "user": user,
    "projects": projects_with_tasks,
    "budgets": budgets,
    "teamsByYou": teams_by_you,
    "teamsInvitedTo": teams_invited_to,
    "stats": {
      "activeProjects": active_projects,
      "tasksDue": tasks_due,
      "budgetSpent": budget_spent,
      "teamMembers": team_members,
      "pendingNotifications": pending_notifications,
    },
    "taskStatusCounts": task_status_counts,
    "monthlyTasksLabels": labels,
    "monthlyTasksData": monthly_tasks_data,
    "projectCompletionByMonth": project_completion,
    "shopItems": shop_items,
    "ongoingOrders": ongoing_orders,
    "deliveredOrders": delivered_orders,
  }))
}

/// `GET /dashboard/{project_id}` — single project detail.
#[instrument(name = "handler::project_details", skip(app_state, session))]
pub async fn project_details_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  session: Session,
) -> Result<HttpResponse, AppError> {
  let Some(user) = SessionUser::from_session(&session) else {
    return Ok(redirect_to_login());
  };

  let project_id = path.into_inner();
  let project: Option<Project> = app_state.items.get_one(PROJECTS_COLLECTION, project_id).await?;

  match project {
    Some(project) => Ok(HttpResponse::Ok().json(json!({ "user": user, "project": project }))),
    None => Err(AppError::NotFound("Project not found".to_string())),
  }
}

/// `GET /orders?status=` — the user's orders filtered by status (comma list
/// allowed), each joined with its product.
#[instrument(name = "handler::orders", skip(app_state, user), fields(user_id = %user.id))]
pub async fn orders_handler(
  app_state: web::Data<AppState>,
  query: web::Query<OrdersQuery>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let status_param = query.into_inner().status.unwrap_or_else(|| "pending".to_string());
  let statuses: Vec<&str> = status_param.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
  if statuses.is_empty() {
    return Err(AppError::Validation("Invalid status filter".to_string()));
  }

  let orders = orders_with_products(&app_state, user.id, &statuses).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn six_month_window_crosses_year_boundary() {
    let now = Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();
    assert_eq!(
      last_six_months(now),
      vec!["2025-09", "2025-10", "2025-11", "2025-12", "2026-01", "2026-02"]
    );
  }

  #[test]
  fn month_label_pads_components() {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(month_label(at), "2026-03");
  }

  fn task_created(status: TaskStatus, created_at: DateTime<Utc>) -> Task {
    Task {
      id: Uuid::new_v4(),
      project_id: Uuid::new_v4(),
      user_id: Uuid::new_v4(),
      name: "pour foundation".to_string(),
      description: None,
      assigned_to: None,
      start_date: None,
      end_date: None,
      priority: None,
      status,
      created_at: Some(created_at),
    }
  }

  #[test]
  fn completion_percentages_group_by_project_and_month() {
    let jan = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
    let feb = Utc.with_ymd_and_hms(2026, 2, 5, 0, 0, 0).unwrap();
    let tasks = vec![
      task_created(TaskStatus::Completed, jan),
      task_created(TaskStatus::Pending, jan),
      task_created(TaskStatus::Completed, feb),
    ];
    let labels = vec!["2026-01".to_string(), "2026-02".to_string()];

    let out = project_completion_by_month(&labels, &[("Warehouse", tasks.as_slice())]);

    assert_eq!(out["2026-01"]["Warehouse"], "50.00");
    assert_eq!(out["2026-02"]["Warehouse"], "100.00");
  }

  #[test]
  fn months_without_tasks_read_zero_completion() {
    let labels = vec!["2026-03".to_string()];
    let out = project_completion_by_month(&labels, &[("Warehouse", &[])]);
    assert_eq!(out["2026-03"]["Warehouse"], "0.00");
  }
}
