// src/web/handlers/shop_handlers.rs

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::session::{redirect_to_login, SessionUser};

#[derive(Deserialize, Debug)]
pub struct AddToCartPayload {
  pub item_id: Uuid,
  pub quantity: i64,
}

/// `GET /shop` — the full catalog plus the badge count of pending cart
/// lines. Degrades to an empty catalog on store failure.
#[instrument(name = "handler::shop_page", skip(app_state, session))]
pub async fn shop_page_handler(app_state: web::Data<AppState>, session: Session) -> HttpResponse {
  let Some(user) = SessionUser::from_session(&session) else {
    return redirect_to_login();
  };

  let items = match app_state.catalog.list_items(None).await {
    Ok(items) => items,
    Err(e) => {
      error!(error = %e, "Failed to fetch shop items, degrading to empty list");
      Vec::new()
    }
  };

  let cart_count = match app_state.cart.list_pending(user.id).await {
    Ok(pending) => pending.len(),
    Err(e) => {
      error!(error = %e, "Failed to fetch cart count");
      0
    }
  };

  HttpResponse::Ok().json(json!({
    "user": user,
    "items": items,
    "cartCount": cart_count,
  }))
}

/// `POST /shop/add-to-cart` — upsert into the pending-orders cart: a second
/// add of the same item increments the existing line instead of duplicating
/// it.
#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, payload, user),
  fields(user_id = %user.id, item_id = %payload.item_id, quantity = %payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AddToCartPayload>,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let line = app_state
    .cart
    .add_or_increment(user.id, payload.item_id, payload.quantity)
    .await?;

  info!(order_id = %line.id, quantity = line.quantity, "Added to cart");

  Ok(HttpResponse::Ok().json(json!({
    "message": "Added to cart",
    "cartLine": line,
  })))
}
