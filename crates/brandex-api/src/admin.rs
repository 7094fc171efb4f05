//! Handlers backing the admin editor.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use brandex_core::RecordStore;
use brandex_query::BrandForm;
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /admin/brands/:id/form`: initial values for the brand editor.
pub async fn brand_form<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<BrandForm>, ApiError> {
  let form = brandex_query::brand_form(store.as_ref(), id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("brand {id} not found")))?;
  Ok(Json(form))
}
