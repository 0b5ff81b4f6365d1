// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  auth_handlers, budget_handlers, cart_handlers, dashboard_handlers, project_handlers, shop_handlers, task_handlers,
  team_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Wires every route. Called from `main.rs` (and from the HTTP tests) to
/// configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    // Authentication & profile
    .route("/signup", web::post().to(auth_handlers::signup_handler))
    .route("/login", web::post().to(auth_handlers::login_handler))
    .route("/logout", web::get().to(auth_handlers::logout_handler))
    .route("/update-user", web::post().to(auth_handlers::update_user_handler))
    // Shop & cart
    .service(
      web::scope("/shop")
        .route("", web::get().to(shop_handlers::shop_page_handler))
        .route("/add-to-cart", web::post().to(shop_handlers::add_to_cart_handler)),
    )
    .service(
      web::scope("/cart")
        .route("", web::get().to(cart_handlers::cart_page_handler))
        .route("/update", web::post().to(cart_handlers::update_cart_handler))
        .route("/checkout", web::post().to(cart_handlers::checkout_handler)),
    )
    .route("/orders", web::get().to(dashboard_handlers::orders_handler))
    // Dashboard
    .service(
      web::scope("/dashboard")
        .route("", web::get().to(dashboard_handlers::dashboard_handler))
        .route("/{project_id}", web::get().to(dashboard_handlers::project_details_handler)),
    )
    // Projects & tasks
    .route("/new-project", web::post().to(project_handlers::new_project_handler))
    .route("/new-task", web::post().to(task_handlers::new_task_handler))
    .route("/edit-task/{id}", web::post().to(task_handlers::edit_task_handler))
    .service(
      web::resource("/task/{id}")
        .route(web::patch().to(task_handlers::patch_task_handler))
        .route(web::delete().to(task_handlers::delete_task_handler)),
    )
    // Budgets
    .route("/budget", web::post().to(budget_handlers::create_budget_handler))
    .route("/edit-budget/{id}", web::post().to(budget_handlers::edit_budget_handler))
    .route("/budget/{id}", web::delete().to(budget_handlers::delete_budget_handler))
    // Teams
    .route("/invite-member", web::post().to(team_handlers::invite_member_handler))
    .route("/team/{id}", web::patch().to(team_handlers::patch_team_handler));
}
