//! Handlers for `/tags` and `/brands/:id/tags` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tags` | Optional `?size`, `search` |
//! | `POST` | `/tags` | Body: `{"name":"..."}`; returns 201 |
//! | `GET`  | `/tags/by-name/:name` | 404 if none, 409 if several |
//! | `GET`  | `/brands/:id/tags` | Assignments with tag and brand expanded |
//! | `POST` | `/brands/:id/tags` | Body: `{"tag_id":"..."}`; returns 201, 404 if no brand, 400 if no tag |
//! | `PUT`  | `/brands/:id/tags` | Body: `{"tag_ids":[...]}`; returns the delta, 400 on unknown tags |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use brandex_core::{
  RecordStore,
  tag::{BrandTag, Tag},
};
use brandex_query::{LookupQuery, TagChanges};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
  pub size:   Option<usize>,
  pub search: Option<String>,
}

impl From<LookupParams> for LookupQuery {
  fn from(p: LookupParams) -> Self { LookupQuery { size: p.size, search: p.search } }
}

#[derive(Debug, Deserialize)]
pub struct NameBody {
  pub name: String,
}

// ─── Tags ─────────────────────────────────────────────────────────────────────

/// `GET /tags[?size=..][&search=..]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<LookupParams>,
) -> Result<Json<Vec<Tag>>, ApiError> {
  let tags = brandex_query::get_tags(store.as_ref(), &params.into()).await?;
  Ok(Json(tags))
}

/// `POST /tags` with body `{"name":"..."}`
pub async fn create<S: RecordStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NameBody>,
) -> Result<impl IntoResponse, ApiError> {
  let name = body.name.trim();
  if name.is_empty() {
    return Err(ApiError::BadRequest("tag name must not be empty".into()));
  }
  let tag = brandex_query::post_tag(store.as_ref(), name).await?;
  Ok((StatusCode::CREATED, Json(tag)))
}

/// `GET /tags/by-name/:name`
pub async fn by_name<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<Tag>, ApiError> {
  let tag = brandex_query::get_tag_by_name(store.as_ref(), &name).await?;
  Ok(Json(tag))
}

// ─── Brand tags ───────────────────────────────────────────────────────────────

/// `GET /brands/:id/tags`
pub async fn for_brand<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<BrandTag>>, ApiError> {
  let rows = brandex_query::get_brand_tags(store.as_ref(), id).await?;
  Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct AssignBody {
  pub tag_id: Uuid,
}

/// `POST /brands/:id/tags` with body `{"tag_id":"..."}`
pub async fn assign<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AssignBody>,
) -> Result<impl IntoResponse, ApiError> {
  let row = brandex_query::post_brand_tag(store.as_ref(), id, body.tag_id).await?;
  Ok((StatusCode::CREATED, Json(row)))
}

#[derive(Debug, Deserialize)]
pub struct ReplaceBody {
  pub tag_ids: Vec<Uuid>,
}

/// `PUT /brands/:id/tags` with body `{"tag_ids":[...]}`, the complete set.
pub async fn replace<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ReplaceBody>,
) -> Result<Json<TagChanges>, ApiError> {
  let changes = brandex_query::replace_tags(store.as_ref(), id, &body.tag_ids).await?;
  Ok(Json(changes))
}
