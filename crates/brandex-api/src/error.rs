//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<brandex_query::Error> for ApiError {
  fn from(e: brandex_query::Error) -> Self {
    use brandex_query::Error as Q;
    match e {
      Q::BrandNotFound(_) | Q::TagNotFound(_) => ApiError::NotFound(e.to_string()),
      Q::MissingReference { .. } => ApiError::BadRequest(e.to_string()),
      Q::AmbiguousTag { .. } | Q::OwnershipCycle { .. } => ApiError::Conflict(e.to_string()),
      Q::Store(inner) => ApiError::Store(inner),
      Q::Decode(_) | Q::EmptyCreate(_) => ApiError::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      // Store messages carry database detail; clients only get the status.
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
