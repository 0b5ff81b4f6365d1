// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Base URL of the external headless-CMS items API.
  pub items_api_url: String,
  /// Process-wide bearer credential for the items API.
  pub items_api_token: String,
  /// Explicit per-call timeout for every items API request.
  pub store_timeout: Duration,

  /// Key material for the cookie session store. Must be at least 64 bytes.
  pub session_secret: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let items_api_url = get_env("ITEMS_API_URL")?;
    let items_api_token = get_env("ITEMS_API_TOKEN")?;

    let store_timeout_secs = get_env("STORE_TIMEOUT_SECS")
      .unwrap_or_else(|_| "10".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid STORE_TIMEOUT_SECS: {}", e)))?;

    let session_secret = get_env("SESSION_SECRET")?;
    if session_secret.len() < 64 {
      return Err(AppError::Config(
        "SESSION_SECRET must be at least 64 bytes".to_string(),
      ));
    }

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      items_api_url,
      items_api_token,
      store_timeout: Duration::from_secs(store_timeout_secs),
      session_secret,
    })
  }
}
