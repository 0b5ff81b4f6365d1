// src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod budget_handlers;
pub mod cart_handlers;
pub mod dashboard_handlers;
pub mod project_handlers;
pub mod shop_handlers;
pub mod task_handlers;
pub mod team_handlers;
