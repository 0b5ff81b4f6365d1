// src/web/session.rs

use crate::errors::AppError;
use actix_session::{Session, SessionExt};
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Session key the logged-in user is stored under.
pub const SESSION_USER_KEY: &str = "user";

/// The identity carried by the session cookie — the sole authentication
/// token. Never holds the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
  pub id: Uuid,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub phone: Option<String>,
}

impl SessionUser {
  /// Reads the current user out of a session, if any.
  pub fn from_session(session: &Session) -> Option<SessionUser> {
    session.get::<SessionUser>(SESSION_USER_KEY).ok().flatten()
  }

  /// Stores this user in the session (login / profile update).
  pub fn persist(&self, session: &Session) -> Result<(), AppError> {
    session
      .insert(SESSION_USER_KEY, self)
      .map_err(|e| AppError::Session(format!("failed to store session user: {}", e)))
  }
}

/// Extractor for API routes: absence or expiry of the session answers
/// `401 {error}` JSON. Page-style routes check the session themselves and
/// redirect instead (see `redirect_to_login`).
impl FromRequest for SessionUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let session = req.get_session();
    match SessionUser::from_session(&session) {
      Some(user) => futures_util::future::ready(Ok(user)),
      None => {
        warn!(path = %req.path(), "Rejected request without a session user");
        futures_util::future::ready(Err(AppError::Auth("Not logged in".to_string())))
      }
    }
  }
}

/// `303 See Other` to the login page, used by page-style routes when the
/// session is missing or expired.
pub fn redirect_to_login() -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, "/login"))
    .finish()
}
