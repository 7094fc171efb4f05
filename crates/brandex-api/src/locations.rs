//! Handlers for `/locations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/locations` | Optional `?size`, `search` |
//! | `POST` | `/locations` | Body: `{"name":"..."}`; returns 201 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use brandex_core::{RecordStore, location::Location};

use crate::{
  error::ApiError,
  tags::{LookupParams, NameBody},
};

/// `GET /locations[?size=..][&search=..]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<LookupParams>,
) -> Result<Json<Vec<Location>>, ApiError> {
  let locations = brandex_query::get_locations(store.as_ref(), &params.into()).await?;
  Ok(Json(locations))
}

/// `POST /locations` with body `{"name":"..."}`
pub async fn create<S: RecordStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NameBody>,
) -> Result<impl IntoResponse, ApiError> {
  let location = brandex_query::post_location(store.as_ref(), &body.name).await?;
  Ok((StatusCode::CREATED, Json(location)))
}
