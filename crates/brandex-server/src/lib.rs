//! HTTP server for the Brandex brand directory.
//!
//! Mounts the JSON API under `/api` behind route-level access control: reads
//! on the configured public routes pass through, every other request needs
//! HTTP Basic credentials.

pub mod access;
pub mod auth;
pub mod error;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use brandex_core::RecordStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::Gate;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BRANDEX_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  pub admin_username:      String,
  pub admin_password_hash: String,
  /// Patterns readable without credentials; see [`access`].
  #[serde(default = "access::default_public_routes")]
  pub public_routes:       Vec<String>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the middleware.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store: Arc<S>,
  pub gate:  Arc<Gate>,
}

impl<S: RecordStore> AppState<S> {
  pub fn new(store: S, config: &ServerConfig) -> Self {
    Self { store: Arc::new(store), gate: Arc::new(Gate::from_config(config)) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + 'static,
{
  Router::new()
    .route("/health", get(|| async { "ok" }))
    .nest("/api", brandex_api::api_router(state.store.clone()))
    .layer(middleware::from_fn_with_state(state, auth::require_auth::<S>))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use brandex_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_state(password: &str) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let config = ServerConfig {
      host:                "127.0.0.1".to_string(),
      port:                8080,
      store_path:          PathBuf::from(":memory:"),
      admin_username:      "admin".to_string(),
      admin_password_hash: auth::hash_password(password).unwrap(),
      public_routes:       access::default_public_routes(),
    };
    AppState::new(store, &config)
  }

  fn auth_header(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  async fn send(
    state: &AppState<SqliteStore>,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
      builder = builder.header(header::AUTHORIZATION, auth);
    }
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    router(state.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Access control ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_is_public() {
    let state = make_state("secret").await;
    let resp = send(&state, "GET", "/health", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn public_reads_need_no_credentials() {
    let state = make_state("secret").await;
    let resp = send(&state, "GET", "/api/brands", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!([]));
  }

  #[tokio::test]
  async fn writes_require_credentials() {
    let state = make_state("secret").await;
    let body = json!({ "name": "Acme" });

    let resp = send(&state, "POST", "/api/brands", None, Some(body.clone())).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let challenge = resp.headers().get(header::WWW_AUTHENTICATE).unwrap();
    assert_eq!(challenge, "Basic realm=\"brandex\"");

    let wrong = auth_header("admin", "wrong");
    let resp = send(&state, "POST", "/api/brands", Some(&wrong), Some(body.clone())).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let good = auth_header("admin", "secret");
    let resp = send(&state, "POST", "/api/brands", Some(&good), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
  }

  #[tokio::test]
  async fn admin_reads_require_credentials() {
    let state = make_state("secret").await;
    let uri = format!("/api/admin/brands/{}/form", Uuid::new_v4());

    let resp = send(&state, "GET", &uri, None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let good = auth_header("admin", "secret");
    let resp = send(&state, "GET", &uri, Some(&good), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── API through the server ──────────────────────────────────────────────────

  #[tokio::test]
  async fn brand_lifecycle() {
    let state = make_state("secret").await;
    let good = auth_header("admin", "secret");

    let resp = send(
      &state,
      "POST",
      "/api/brands",
      Some(&good),
      Some(json!({ "name": "Acme", "price": 10, "marked": "0" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json_body(resp).await;
    let id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(created["marked"], json!(0));

    let resp = send(
      &state,
      "PATCH",
      &format!("/api/brands/{id}"),
      Some(&good),
      Some(json!({ "marked": "1", "mark_reason": "counterfeit" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&state, "GET", &format!("/api/brands/{id}"), None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = json_body(resp).await;
    assert_eq!(fetched["name"], json!("Acme"));
    assert_eq!(fetched["price"], json!(10));
    assert_eq!(fetched["marked"], json!(1));
    assert_eq!(fetched["mark_reason"], json!("counterfeit"));

    let resp = send(&state, "GET", "/api/brands?marked=1&search=acm", None, None).await;
    let listed = json_body(resp).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
  }

  #[tokio::test]
  async fn missing_brand_and_cycles_map_to_statuses() {
    let state = make_state("secret").await;
    let good = auth_header("admin", "secret");

    let resp = send(&state, "GET", &format!("/api/brands/{}", Uuid::new_v4()), None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(json_body(resp).await["error"].as_str().is_some());

    let resp = send(
      &state,
      "PATCH",
      &format!("/api/brands/{}", Uuid::new_v4()),
      Some(&good),
      Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&state, "POST", "/api/brands", Some(&good), Some(json!({ "name": "Acme" }))).await;
    let id = json_body(resp).await["id"].as_str().unwrap().to_owned();
    let resp = send(
      &state,
      "PATCH",
      &format!("/api/brands/{id}"),
      Some(&good),
      Some(json!({ "owned_by": id })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn unknown_links_are_client_errors() {
    let state = make_state("secret").await;
    let good = auth_header("admin", "secret");
    let nowhere = Uuid::new_v4();

    let resp = send(
      &state,
      "POST",
      "/api/brands",
      Some(&good),
      Some(json!({ "name": "x", "location": nowhere })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error = json_body(resp).await["error"].as_str().unwrap_or_default().to_owned();
    assert!(!error.contains("FOREIGN KEY"), "{error}");

    let resp = send(&state, "POST", "/api/brands", Some(&good), Some(json!({ "name": "Acme" }))).await;
    let brand = json_body(resp).await["id"].as_str().unwrap().to_owned();

    let resp = send(
      &state,
      "PATCH",
      &format!("/api/brands/{brand}"),
      Some(&good),
      Some(json!({ "owned_by": nowhere })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&state, "POST", "/api/tags", Some(&good), Some(json!({ "name": "food" }))).await;
    let tag = json_body(resp).await["id"].clone();

    let resp = send(
      &state,
      "POST",
      &format!("/api/brands/{nowhere}/tags"),
      Some(&good),
      Some(json!({ "tag_id": tag })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/brands/{brand}/tags");
    let resp = send(&state, "POST", &uri, Some(&good), Some(json!({ "tag_id": nowhere }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&state, "PUT", &uri, Some(&good), Some(json!({ "tag_ids": [tag, nowhere] }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&state, "GET", &uri, None, None).await;
    assert_eq!(json_body(resp).await, json!([]));

    let resp = send(
      &state,
      "PUT",
      &format!("/api/brands/{nowhere}/mark-sources"),
      Some(&good),
      Some(json!([])),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn tags_are_replaced_through_the_api() {
    let state = make_state("secret").await;
    let good = auth_header("admin", "secret");

    let resp = send(&state, "POST", "/api/brands", Some(&good), Some(json!({ "name": "Acme" }))).await;
    let brand = json_body(resp).await["id"].as_str().unwrap().to_owned();

    let mut tag_ids = Vec::new();
    for name in ["food", "retail"] {
      let resp = send(&state, "POST", "/api/tags", Some(&good), Some(json!({ "name": name }))).await;
      assert_eq!(resp.status(), StatusCode::CREATED);
      tag_ids.push(json_body(resp).await["id"].clone());
    }

    let uri = format!("/api/brands/{brand}/tags");
    let resp = send(&state, "PUT", &uri, Some(&good), Some(json!({ "tag_ids": tag_ids }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let changes = json_body(resp).await;
    assert_eq!(changes["added"].as_array().map(Vec::len), Some(2));

    let resp = send(&state, "PUT", &uri, Some(&good), Some(json!({ "tag_ids": [tag_ids[1]] }))).await;
    let changes = json_body(resp).await;
    assert_eq!(changes["removed"].as_array().map(Vec::len), Some(1));

    let resp = send(&state, "GET", &uri, None, None).await;
    let rows = json_body(resp).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["tag"]["name"], json!("retail"));

    let resp = send(&state, "GET", "/api/tags/by-name/retail", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&state, "GET", "/api/tags/by-name/missing", None, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn empty_tag_name_is_a_bad_request() {
    let state = make_state("secret").await;
    let good = auth_header("admin", "secret");
    let resp = send(&state, "POST", "/api/tags", Some(&good), Some(json!({ "name": "  " }))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn reports_require_credentials_and_are_created() {
    let state = make_state("secret").await;
    let body = json!({ "name": "Initech", "proofUrl": "https://example.com" });

    let resp = send(&state, "POST", "/api/reports", None, Some(body.clone())).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let good = auth_header("admin", "secret");
    let resp = send(&state, "POST", "/api/reports", Some(&good), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(json_body(resp).await["proofUrl"], json!("https://example.com"));
  }
}
