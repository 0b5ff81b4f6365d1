// src/main.rs

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

use sitewise::config::AppConfig;
use sitewise::services::{PendingOrderStore, ShopCatalog};
use sitewise::state::AppState;
use sitewise::store::ItemsClient;
use sitewise::web::configure_app_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting sitewise server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  // The items API client is constructed once and injected everywhere;
  // nothing else in the process holds the credential.
  let items = match ItemsClient::new(
    &app_config.items_api_url,
    &app_config.items_api_token,
    app_config.store_timeout,
  ) {
    Ok(client) => Arc::new(client),
    Err(e) => {
      tracing::error!(error = %e, "Failed to construct items API client.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let app_state = AppState {
    config: app_config.clone(),
    items: items.clone(),
    catalog: Arc::new(ShopCatalog::new(items.clone())),
    cart: Arc::new(PendingOrderStore::new(items.clone())),
  };

  let session_key = Key::from(app_config.session_secret.as_bytes());

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(SessionMiddleware::new(CookieSessionStore::default(), session_key.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
