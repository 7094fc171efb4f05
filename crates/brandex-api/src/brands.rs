//! Handlers for `/brands` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/brands` | Optional `?size`, `offset`, `search`, `marked=0\|1` |
//! | `POST`  | `/brands` | Body: [`BrandInput`]; returns 201, 400 on an unknown link |
//! | `GET`   | `/brands/:id` | 404 if not found |
//! | `PATCH` | `/brands/:id` | Body: [`BrandInput`]; 404 if not found, 400 on an unknown link, 409 on an ownership cycle |
//! | `GET`   | `/brands/:id/mark-sources` | |
//! | `PUT`   | `/brands/:id/mark-sources` | Body: `[{"name":"...","url":"..."}]`; 404 if no brand |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use brandex_core::{
  RecordStore,
  brand::{Brand, BrandInput, MarkSource, MarkSourceInput},
};
use brandex_query::BrandQuery;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub size:   Option<usize>,
  pub offset: Option<usize>,
  pub search: Option<String>,
  #[serde(default, deserialize_with = "brandex_core::flag::option::deserialize")]
  pub marked: Option<bool>,
}

impl From<ListParams> for BrandQuery {
  fn from(p: ListParams) -> Self {
    BrandQuery {
      size:      p.size,
      offset:    p.offset,
      search:    p.search,
      is_marked: p.marked,
    }
  }
}

/// `GET /brands[?size=..][&offset=..][&search=..][&marked=0|1]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Brand>>, ApiError> {
  let brands = brandex_query::get_brands(store.as_ref(), &params.into()).await?;
  Ok(Json(brands))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// `POST /brands`: returns 201 + the stored brand.
pub async fn create<S: RecordStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<BrandInput>,
) -> Result<impl IntoResponse, ApiError> {
  let brand = brandex_query::post_brand(store.as_ref(), &body).await?;
  Ok((StatusCode::CREATED, Json(brand)))
}

/// `PATCH /brands/:id`: only the fields present in the body are written.
pub async fn patch<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<BrandInput>,
) -> Result<Json<Brand>, ApiError> {
  let brand = brandex_query::patch_brand(store.as_ref(), id, &body).await?;
  Ok(Json(brand))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /brands/:id`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Brand>, ApiError> {
  let brand = brandex_query::get_brand(store.as_ref(), id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("brand {id} not found")))?;
  Ok(Json(brand))
}

// ─── Mark sources ─────────────────────────────────────────────────────────────

/// `GET /brands/:id/mark-sources`
pub async fn mark_sources<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<MarkSource>>, ApiError> {
  let sources = brandex_query::get_brand_mark_sources(store.as_ref(), id).await?;
  Ok(Json(sources))
}

/// `PUT /brands/:id/mark-sources`: replaces every source of the brand.
pub async fn replace_mark_sources<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<Vec<MarkSourceInput>>,
) -> Result<Json<Vec<MarkSource>>, ApiError> {
  let sources = brandex_query::upsert_brand_mark_sources(store.as_ref(), id, &body).await?;
  Ok(Json(sources))
}
