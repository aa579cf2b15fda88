//! HTTP server assembly for Amity.
//!
//! Wires a [`RelationshipEngine`] into the JSON API, adds request tracing and
//! a per-request deadline, and exposes a health probe.

use std::{path::PathBuf, time::Duration};

use amity_core::{RelationshipEngine, store::RelationshipStore};
use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `AMITY_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  /// SQLite database file; a leading `~/` is expanded.
  pub store_path:           PathBuf,
  /// Requests running longer than this are answered with 408.
  pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".to_string(),
      port:                 8080,
      store_path:           PathBuf::from("amity.db"),
      request_timeout_secs: 10,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/health` plus the API under
/// `/api/v1`.
pub fn router<S>(engine: RelationshipEngine<S>, config: &ServerConfig) -> Router
where
  S: RelationshipStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api/v1", amity_api::api_router(engine))
    .layer(TimeoutLayer::with_status_code(
      StatusCode::REQUEST_TIMEOUT,
      config.request_timeout(),
    ))
    .layer(TraceLayer::new_for_http())
}

/// `GET /health`
async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use amity_store_sqlite::SqliteStore;
  use amity_core::{
    Email,
    relationship::{BroadcastAudience, Relationship, UserAccount},
  };
  use axum::{
    body::Body,
    http::{Request, header},
  };
  use tower::ServiceExt as _;

  use super::*;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(RelationshipEngine::new(Arc::new(store)), &ServerConfig::default())
  }

  #[tokio::test]
  async fn health_is_ok() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
  }

  #[tokio::test]
  async fn api_is_nested_under_v1() {
    let req = Request::builder()
      .method("POST")
      .uri("/api/v1/friends/showFriendsByEmail")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"email":"alice@x.com"}"#))
      .unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  /// A store whose calls never complete.
  struct StalledStore;

  #[derive(Debug, thiserror::Error)]
  #[error("unreachable")]
  struct Never;

  impl RelationshipStore for StalledStore {
    type Error = Never;

    async fn create_user_account(&self, _: Email) -> Result<UserAccount, Never> {
      std::future::pending().await
    }

    async fn upsert_friend_edge(&self, _: Email, _: Email) -> Result<(), Never> {
      std::future::pending().await
    }

    async fn upsert_subscription(&self, _: Email, _: Email) -> Result<(), Never> {
      std::future::pending().await
    }

    async fn upsert_subscribe_block(&self, _: Email, _: Email) -> Result<(), Never> {
      std::future::pending().await
    }

    async fn get_relationship(&self, _: Email, _: Email) -> Result<Option<Relationship>, Never> {
      std::future::pending().await
    }

    async fn find_friends(&self, _: Email) -> Result<Vec<Email>, Never> {
      std::future::pending().await
    }

    async fn find_common_friends(&self, _: Vec<Email>) -> Result<Vec<Email>, Never> {
      std::future::pending().await
    }

    async fn find_broadcast_audience(&self, _: Email) -> Result<BroadcastAudience, Never> {
      std::future::pending().await
    }
  }

  #[tokio::test(start_paused = true)]
  async fn slow_requests_time_out_with_408() {
    let cfg = ServerConfig { request_timeout_secs: 2, ..ServerConfig::default() };
    let app = router(RelationshipEngine::new(Arc::new(StalledStore)), &cfg);

    let req = Request::builder()
      .method("POST")
      .uri("/api/v1/friends/showFriendsByEmail")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"email":"alice@x.com"}"#))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
  }

  #[test]
  fn config_defaults_fill_missing_fields() {
    let cfg: ServerConfig = config::Config::builder()
      .add_source(config::File::from_str(
        "port = 9000\nstore_path = \"/tmp/amity.db\"",
        config::FileFormat::Toml,
      ))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/amity.db"));
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
    assert_eq!(cfg.address(), "127.0.0.1:9000");
  }
}
