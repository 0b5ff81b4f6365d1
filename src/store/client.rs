// src/store/client.rs

use crate::errors::StoreError;
use crate::store::filter::Query;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, warn};
use uuid::Uuid;

/// The items API wraps every payload in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
  data: T,
}

/// Client for the external items API, constructed once at process start and
/// injected through `AppState`. Carries the process-wide bearer credential
/// and an explicit per-call timeout.
#[derive(Debug, Clone)]
pub struct ItemsClient {
  http: reqwest::Client,
  base_url: String,
}

impl ItemsClient {
  pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, StoreError> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
      .map_err(|_| StoreError::Status { status: 0, collection: "auth header".to_string() })?;
    headers.insert(AUTHORIZATION, bearer);

    let http = reqwest::Client::builder()
      .timeout(timeout)
      .default_headers(headers)
      .build()
      .map_err(StoreError::Unavailable)?;

    Ok(Self {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  fn collection_url(&self, collection: &str) -> String {
    format!("{}/items/{}", self.base_url, collection)
  }

  fn record_url(&self, collection: &str, id: Uuid) -> String {
    format!("{}/items/{}/{}", self.base_url, collection, id)
  }

  /// Lists records of a collection matching `query`.
  #[instrument(name = "store::list", skip(self, query))]
  pub async fn list<T: DeserializeOwned>(&self, collection: &str, query: &Query) -> Result<Vec<T>, StoreError> {
    let response = self
      .http
      .get(self.collection_url(collection))
      .query(query.params())
      .send()
      .await
      .map_err(StoreError::Unavailable)?;

    let status = response.status();
    if !status.is_success() {
      warn!(collection, %status, "items API list rejected");
      return Err(StoreError::Status { status: status.as_u16(), collection: collection.to_string() });
    }

    let envelope: Envelope<Vec<T>> = response.json().await.map_err(|source| StoreError::Decode {
      collection: collection.to_string(),
      source,
    })?;
    Ok(envelope.data)
  }

  /// Fetches a single record by id; a 404 becomes `None`.
  #[instrument(name = "store::get_one", skip(self))]
  pub async fn get_one<T: DeserializeOwned>(&self, collection: &str, id: Uuid) -> Result<Option<T>, StoreError> {
    let response = self
      .http
      .get(self.record_url(collection, id))
      .send()
      .await
      .map_err(StoreError::Unavailable)?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
      // The items API answers 403 for ids outside the token's scope;
      // treat both as absent.
      return Ok(None);
    }
    if !status.is_success() {
      return Err(StoreError::Status { status: status.as_u16(), collection: collection.to_string() });
    }

    let envelope: Envelope<T> = response.json().await.map_err(|source| StoreError::Decode {
      collection: collection.to_string(),
      source,
    })?;
    Ok(Some(envelope.data))
  }

  /// Creates a record and returns the stored representation.
  #[instrument(name = "store::create", skip(self, payload))]
  pub async fn create<P: Serialize, T: DeserializeOwned>(
    &self,
    collection: &str,
    payload: &P,
  ) -> Result<T, StoreError> {
    let response = self
      .http
      .post(self.collection_url(collection))
      .json(payload)
      .send()
      .await
      .map_err(StoreError::Unavailable)?;

    let status = response.status();
    if !status.is_success() {
      warn!(collection, %status, "items API create rejected");
      return Err(StoreError::Status { status: status.as_u16(), collection: collection.to_string() });
    }

    let envelope: Envelope<T> = response.json().await.map_err(|source| StoreError::Decode {
      collection: collection.to_string(),
      source,
    })?;
    Ok(envelope.data)
  }

  /// Patches a record by id.
  #[instrument(name = "store::patch", skip(self, payload))]
  pub async fn patch<P: Serialize>(&self, collection: &str, id: Uuid, payload: &P) -> Result<(), StoreError> {
    let response = self
      .http
      .request(Method::PATCH, self.record_url(collection, id))
      .json(payload)
      .send()
      .await
      .map_err(StoreError::Unavailable)?;

    let status = response.status();
    if !status.is_success() {
      warn!(collection, %id, %status, "items API patch rejected");
      return Err(StoreError::Status { status: status.as_u16(), collection: collection.to_string() });
    }
    Ok(())
  }

  /// Deletes a record by id. Deleting an already-absent record succeeds
  /// silently, which keeps cart line removal idempotent.
  #[instrument(name = "store::delete", skip(self))]
  pub async fn delete(&self, collection: &str, id: Uuid) -> Result<(), StoreError> {
    let response = self
      .http
      .delete(self.record_url(collection, id))
      .send()
      .await
      .map_err(StoreError::Unavailable)?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Ok(());
    }
    if !status.is_success() {
      warn!(collection, %id, %status, "items API delete rejected");
      return Err(StoreError::Status { status: status.as_u16(), collection: collection.to_string() });
    }
    Ok(())
  }
}
