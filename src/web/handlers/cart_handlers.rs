// src/web/handlers/cart_handlers.rs

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::{build_cart_view, checkout, CartView};
use crate::state::AppState;
use crate::web::session::{redirect_to_login, SessionUser};

#[derive(Deserialize, Debug)]
pub struct UpdateCartPayload {
  pub order_id: Uuid,
  pub quantity: i64,
}

/// `GET /cart` — the user's pending lines joined with catalog data.
///
/// Page-style route: no session redirects to `/login`; a store failure
/// degrades to an empty view instead of an error page.
#[instrument(name = "handler::cart_page", skip(app_state, session))]
pub async fn cart_page_handler(app_state: web::Data<AppState>, session: Session) -> HttpResponse {
  let Some(user) = SessionUser::from_session(&session) else {
    return redirect_to_login();
  };

  let view = match build_cart_view(app_state.cart.as_ref(), app_state.catalog.as_ref(), user.id).await {
    Ok(view) => view,
    Err(e) => {
      error!(user_id = %user.id, error = %e, "Failed to build cart view, degrading to empty cart");
      CartView::default()
    }
  };

  HttpResponse::Ok().json(json!({
    "user": user,
    "cartItems": view.lines,
    "grandTotal": view.grand_total,
  }))
}

/// `POST /cart/update` — overwrite a line's quantity; zero or less removes
/// the line.
#[instrument(
  name = "handler::update_cart",
  skip(app_state, payload, user),
  fields(user_id = %user.id, order_id = %payload.order_id, quantity = %payload.quantity)
)]
pub async fn update_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<UpdateCartPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  app_state
    .cart
    .set_quantity(user.id, payload.order_id, payload.quantity)
    .await?;

  Ok(HttpResponse::Ok().json(json!({ "message": "Cart updated" })))
}

/// `POST /cart/checkout` — finalize all pending lines.
///
/// Partial success is a 200 with the per-line split; only an empty cart
/// (400) or every line failing (500) is an error.
#[instrument(name = "handler::checkout", skip(app_state, user), fields(user_id = %user.id))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let outcome = checkout(app_state.cart.as_ref(), app_state.catalog.as_ref(), user.id, &user.name).await?;

  let message = if outcome.is_partial() {
    format!(
      "Checkout partially completed: {} of {} items processed",
      outcome.completed.len(),
      outcome.completed.len() + outcome.failed.len()
    )
  } else {
    "Order placed successfully".to_string()
  };

  info!(
    user_id = %user.id,
    completed = outcome.completed.len(),
    failed = outcome.failed.len(),
    "Checkout request finished"
  );

  Ok(HttpResponse::Ok().json(json!({
    "message": message,
    "completed": outcome.completed,
    "failed": outcome.failed,
    "totalPaid": outcome.total_paid,
  })))
}
