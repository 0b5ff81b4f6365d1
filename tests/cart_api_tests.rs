// tests/cart_api_tests.rs
//
// HTTP-level tests for the shop and cart routes, exercising the session
// middleware, the extractor behavior and the JSON contracts. The cart and
// catalog are the in-memory doubles; a session is obtained through a
// test-only login route that stores the user directly.

mod common;

use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, HttpResponse};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use common::{test_item, test_user, InMemoryCartStore, InMemoryCatalog};
use sitewise::config::AppConfig;
use sitewise::state::AppState;
use sitewise::store::ItemsClient;
use sitewise::web::configure_app_routes;
use sitewise::web::session::SessionUser;

fn test_state(catalog: Arc<InMemoryCatalog>, cart: Arc<InMemoryCartStore>) -> AppState {
  let config = AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    items_api_url: "http://127.0.0.1:9".to_string(),
    items_api_token: "test-token".to_string(),
    store_timeout: Duration::from_secs(1),
    session_secret: "x".repeat(64),
  };
  let items = ItemsClient::new(&config.items_api_url, &config.items_api_token, config.store_timeout)
    .expect("test items client");
  AppState {
    config: Arc::new(config),
    items: Arc::new(items),
    catalog,
    cart,
  }
}

async fn test_login_handler(session: Session, user: web::Json<SessionUser>) -> HttpResponse {
  user.into_inner().persist(&session).expect("persist test session");
  HttpResponse::Ok().finish()
}

macro_rules! test_app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($state))
        .wrap(
          SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&[7u8; 64]))
            .cookie_secure(false)
            .build(),
        )
        .route("/test/login", web::post().to(test_login_handler))
        .configure(configure_app_routes),
    )
    .await
  };
}

macro_rules! login {
  ($app:expr, $user:expr) => {{
    let resp = test::call_service(
      &$app,
      test::TestRequest::post().uri("/test/login").set_json($user).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    resp
      .response()
      .cookies()
      .next()
      .expect("session cookie on login response")
      .into_owned()
  }};
}

fn with_session(req: test::TestRequest, cookie: &Cookie<'static>) -> test::TestRequest {
  req.cookie(cookie.clone())
}

#[actix_web::test]
async fn cart_page_without_session_redirects_to_login() {
  let state = test_state(Arc::new(InMemoryCatalog::default()), Arc::new(InMemoryCartStore::default()));
  let app = test_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/cart").to_request()).await;

  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  assert_eq!(
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
    Some("/login")
  );
}

#[actix_web::test]
async fn cart_update_without_session_is_unauthorized() {
  let state = test_state(Arc::new(InMemoryCatalog::default()), Arc::new(InMemoryCartStore::default()));
  let app = test_app!(state);

  let resp = test::call_service(
    &app,
    test::TestRequest::post()
      .uri("/cart/update")
      .set_json(json!({ "order_id": Uuid::new_v4(), "quantity": 1 }))
      .to_request(),
  )
  .await;

  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn adding_the_same_item_twice_keeps_a_single_line() {
  let item = test_item("Cement Bag", "10.00");
  let cart = Arc::new(InMemoryCartStore::default());
  let state = test_state(Arc::new(InMemoryCatalog::with_items([item.clone()])), cart.clone());
  let app = test_app!(state);
  let cookie = login!(app, &test_user());

  for quantity in [1, 3] {
    let resp = test::call_service(
      &app,
      with_session(test::TestRequest::post().uri("/shop/add-to-cart"), &cookie)
        .set_json(json!({ "item_id": item.id, "quantity": quantity }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  assert_eq!(cart.order_count(), 1);

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::get().uri("/cart"), &cookie).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["cartItems"].as_array().map(Vec::len), Some(1));
  assert_eq!(body["cartItems"][0]["quantity"], 4);
  assert_eq!(body["grandTotal"], "40.00");
}

#[actix_web::test]
async fn updating_a_line_overwrites_the_quantity_and_repeats_are_harmless() {
  let item = test_item("Cement Bag", "10.00");
  let cart = Arc::new(InMemoryCartStore::default());
  let state = test_state(Arc::new(InMemoryCatalog::with_items([item.clone()])), cart.clone());
  let app = test_app!(state);
  let cookie = login!(app, &test_user());

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::post().uri("/shop/add-to-cart"), &cookie)
      .set_json(json!({ "item_id": item.id, "quantity": 2 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: serde_json::Value = test::read_body_json(resp).await;
  let order_id = body["cartLine"]["id"].as_str().expect("order id in response").to_string();

  for _ in 0..2 {
    let resp = test::call_service(
      &app,
      with_session(test::TestRequest::post().uri("/cart/update"), &cookie)
        .set_json(json!({ "order_id": order_id, "quantity": 5 }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::get().uri("/cart"), &cookie).to_request(),
  )
  .await;
  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["cartItems"][0]["quantity"], 5);
  assert_eq!(body["grandTotal"], "50.00");
}

#[actix_web::test]
async fn updating_a_line_to_zero_removes_it_and_stays_ok_on_repeat() {
  let item = test_item("Cement Bag", "10.00");
  let cart = Arc::new(InMemoryCartStore::default());
  let state = test_state(Arc::new(InMemoryCatalog::with_items([item.clone()])), cart.clone());
  let app = test_app!(state);
  let cookie = login!(app, &test_user());

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::post().uri("/shop/add-to-cart"), &cookie)
      .set_json(json!({ "item_id": item.id, "quantity": 2 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: serde_json::Value = test::read_body_json(resp).await;
  let order_id = body["cartLine"]["id"].as_str().expect("order id in response").to_string();

  for _ in 0..2 {
    let resp = test::call_service(
      &app,
      with_session(test::TestRequest::post().uri("/cart/update"), &cookie)
        .set_json(json!({ "order_id": order_id, "quantity": 0 }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  assert_eq!(cart.order_count(), 0);

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::get().uri("/cart"), &cookie).to_request(),
  )
  .await;
  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["cartItems"].as_array().map(Vec::len), Some(0));
  assert_eq!(body["grandTotal"], "0.00");
}

#[actix_web::test]
async fn checkout_finalizes_the_cart_then_rejects_the_empty_cart() {
  let item_a = test_item("Cement Bag", "10.00");
  let item_b = test_item("Rebar Bundle", "5.00");
  let cart = Arc::new(InMemoryCartStore::default());
  let state = test_state(
    Arc::new(InMemoryCatalog::with_items([item_a.clone(), item_b.clone()])),
    cart.clone(),
  );
  let app = test_app!(state);
  let cookie = login!(app, &test_user());

  for (item, quantity) in [(&item_a, 2), (&item_b, 3)] {
    let resp = test::call_service(
      &app,
      with_session(test::TestRequest::post().uri("/shop/add-to-cart"), &cookie)
        .set_json(json!({ "item_id": item.id, "quantity": quantity }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::post().uri("/cart/checkout"), &cookie).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Order placed successfully");
  assert_eq!(body["completed"].as_array().map(Vec::len), Some(2));
  assert_eq!(body["failed"].as_array().map(Vec::len), Some(0));
  assert_eq!(body["totalPaid"], "35.00");

  // Everything is finalized, so a second checkout sees an empty cart.
  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::post().uri("/cart/checkout"), &cookie).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "Cart is empty");
}

#[actix_web::test]
async fn partial_checkout_reports_the_split_with_ok_status() {
  let item_a = test_item("Cement Bag", "10.00");
  let item_b = test_item("Rebar Bundle", "5.00");
  let cart = Arc::new(InMemoryCartStore::default());
  let state = test_state(
    Arc::new(InMemoryCatalog::with_items([item_a.clone(), item_b.clone()])),
    cart.clone(),
  );
  let app = test_app!(state);
  let user = test_user();
  let cookie = login!(app, &user);

  for (item, quantity) in [(&item_a, 2), (&item_b, 3)] {
    let resp = test::call_service(
      &app,
      with_session(test::TestRequest::post().uri("/shop/add-to-cart"), &cookie)
        .set_json(json!({ "item_id": item.id, "quantity": quantity }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  let failing = cart
    .all_orders()
    .into_iter()
    .find(|o| o.product_id == item_b.id)
    .expect("line for second item");
  cart.fail_complete_of(failing.id);

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::post().uri("/cart/checkout"), &cookie).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Checkout partially completed: 1 of 2 items processed");
  assert_eq!(body["completed"].as_array().map(Vec::len), Some(1));
  assert_eq!(body["failed"].as_array().map(Vec::len), Some(1));
  assert_eq!(body["totalPaid"], "20.00");
}

#[actix_web::test]
async fn shop_page_reports_the_pending_line_count() {
  let item = test_item("Cement Bag", "10.00");
  let cart = Arc::new(InMemoryCartStore::default());
  let state = test_state(Arc::new(InMemoryCatalog::with_items([item.clone()])), cart.clone());
  let app = test_app!(state);
  let cookie = login!(app, &test_user());

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::post().uri("/shop/add-to-cart"), &cookie)
      .set_json(json!({ "item_id": item.id, "quantity": 2 }))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::get().uri("/shop"), &cookie).to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
  assert_eq!(body["cartCount"], 1);
}

#[actix_web::test]
async fn add_to_cart_rejects_a_non_positive_quantity() {
  let item = test_item("Cement Bag", "10.00");
  let cart = Arc::new(InMemoryCartStore::default());
  let state = test_state(Arc::new(InMemoryCatalog::with_items([item.clone()])), cart.clone());
  let app = test_app!(state);
  let cookie = login!(app, &test_user());

  let resp = test::call_service(
    &app,
    with_session(test::TestRequest::post().uri("/shop/add-to-cart"), &cookie)
      .set_json(json!({ "item_id": item.id, "quantity": 0 }))
      .to_request(),
  )
  .await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(cart.order_count(), 0);
}
