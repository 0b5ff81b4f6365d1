// src/web/handlers/auth_handlers.rs

use actix_session::Session;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::User;
use crate::services::auth;
use crate::state::AppState;
use crate::store::Query;
use crate::web::session::{SessionUser, SESSION_USER_KEY};

pub const USERS_COLLECTION: &str = "users";

#[derive(Deserialize, Debug)]
pub struct SignupPayload {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginPayload {
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateUserPayload {
  pub name: Option<String>,
  pub phone: Option<String>,
  pub profile_image: Option<String>,
}

/// `POST /signup` — register a new user. The password is argon2-hashed
/// before it ever reaches the items API.
#[instrument(name = "handler::signup", skip(app_state, payload))]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<SignupPayload>,
) -> Result<HttpResponse, AppError> {
  let SignupPayload { name, email, phone, password } = payload.into_inner();

  if name.trim().is_empty() || email.trim().is_empty() || phone.trim().is_empty() || password.is_empty() {
    return Err(AppError::Validation("Please fill all the fields".to_string()));
  }

  let existing: Vec<User> = app_state
    .items
    .list(USERS_COLLECTION, &Query::new().eq("email", &email))
    .await?;
  if !existing.is_empty() {
    return Err(AppError::Validation("Email already registered".to_string()));
  }

  let password_hash = auth::hash_password(&password)?;
  let user: User = app_state
    .items
    .create(
      USERS_COLLECTION,
      &json!({
        "name": name,
        "email": email,
        "phone": phone,
        "password": password_hash,
      }),
    )
    .await?;

  info!(user_id = %user.id, "User registered");
  Ok(HttpResponse::Created().json(json!({
    "message": "User registered successfully",
    "user": user,
  })))
}

/// `POST /login` — verify credentials and load the user into the session.
#[instrument(name = "handler::login", skip(app_state, payload, session))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<LoginPayload>,
  session: Session,
) -> Result<HttpResponse, AppError> {
  let LoginPayload { email, password } = payload.into_inner();

  if email.trim().is_empty() || password.is_empty() {
    return Err(AppError::Validation("Please fill in all fields".to_string()));
  }

  let mut users: Vec<User> = app_state
    .items
    .list(USERS_COLLECTION, &Query::new().eq("email", &email))
    .await?;

  let Some(user) = users.pop() else {
    warn!("Login attempt for unknown email");
    return Err(AppError::Auth("Invalid credentials".to_string()));
  };

  if !auth::verify_password(&user.password, &password)? {
    warn!(user_id = %user.id, "Login attempt with wrong password");
    return Err(AppError::Auth("Invalid credentials".to_string()));
  }

  let session_user = SessionUser {
    id: user.id,
    name: user.name.clone(),
    email: user.email.clone(),
    phone: user.phone.clone(),
  };
  session_user.persist(&session)?;

  info!(user_id = %user.id, "Login successful");
  Ok(HttpResponse::Ok().json(json!({
    "message": "Login successful",
    "redirect": "/dashboard",
  })))
}

/// `GET /logout` — destroy the session and return to the home page.
#[instrument(name = "handler::logout", skip(session))]
pub async fn logout_handler(session: Session) -> HttpResponse {
  session.purge();
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, "/"))
    .finish()
}

/// `POST /update-user` — partial profile update; the session copy is
/// refreshed so later requests see the new values.
#[instrument(name = "handler::update_user", skip(app_state, payload, session, user), fields(user_id = %user.id))]
pub async fn update_user_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<UpdateUserPayload>,
  session: Session,
  user: SessionUser,
) -> Result<HttpResponse, AppError> {
  let UpdateUserPayload { name, phone, profile_image } = payload.into_inner();

  let mut update = serde_json::Map::new();
  if let Some(name) = &name {
    update.insert("name".to_string(), json!(name));
  }
  if let Some(phone) = &phone {
    update.insert("phone".to_string(), json!(phone));
  }
  if let Some(profile_image) = &profile_image {
    update.insert("profile_image".to_string(), json!(profile_image));
  }
  if update.is_empty() {
    return Err(AppError::Validation("Nothing to update".to_string()));
  }

  app_state
    .items
    .patch(USERS_COLLECTION, user.id, &serde_json::Value::Object(update))
    .await?;

  let refreshed = SessionUser {
    id: user.id,
    name: name.unwrap_or(user.name),
    email: user.email,
    phone: phone.or(user.phone),
  };
  session
    .insert(SESSION_USER_KEY, &refreshed)
    .map_err(|e| AppError::Session(format!("failed to refresh session user: {}", e)))?;

  Ok(HttpResponse::Ok().json(json!({ "message": "User updated successfully" })))
}
