// src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the external items API.
///
/// Transport problems (connection refused, DNS, timeout) are all
/// `Unavailable`; the per-call timeout configured on the client maps here
/// too. Non-2xx answers and undecodable bodies get their own variants so
/// logs can tell an unreachable store from a misbehaving one.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("items API unreachable: {0}")]
  Unavailable(#[source] reqwest::Error),

  #[error("items API returned status {status} for '{collection}'")]
  Status { status: u16, collection: String },

  #[error("failed to decode items API response for '{collection}': {source}")]
  Decode {
    collection: String,
    #[source]
    source: reqwest::Error,
  },
}

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// Checkout was attempted with no pending order lines.
  #[error("Cart is empty")]
  EmptyCart,

  /// Every line of a checkout failed; the cart is unchanged.
  #[error("Checkout failed: {0}")]
  CheckoutFailed(String),

  /// The catalog could not be read. Recoverable and user-visible
  /// ("try again"), never fatal to the process.
  #[error("Catalog unavailable: {0}")]
  CatalogUnavailable(String),

  #[error("Store Error: {0}")]
  Store(#[from] StoreError),

  #[error("Session Error: {0}")]
  Session(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Handlers occasionally use `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response.
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::EmptyCart => HttpResponse::BadRequest().json(json!({"error": "Cart is empty"})),
      AppError::CheckoutFailed(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Checkout failed", "detail": m}))
      }
      AppError::CatalogUnavailable(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Catalog unavailable", "detail": m}))
      }
      AppError::Store(_) => HttpResponse::InternalServerError().json(json!({"error": "Internal server error"})),
      AppError::Session(_) => HttpResponse::InternalServerError().json(json!({"error": "Session handling failed"})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application.
pub type Result<T, E = AppError> = std::result::Result<T, E>;
