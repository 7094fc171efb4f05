//! Handlers for product listings.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use brandex_core::{RecordStore, product::Product};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /products`
pub async fn list<S: RecordStore>(State(store): State<Arc<S>>) -> Result<Json<Vec<Product>>, ApiError> {
  Ok(Json(brandex_query::get_products(store.as_ref()).await?))
}

/// `GET /brands/:id/products`
pub async fn for_brand<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Product>>, ApiError> {
  Ok(Json(brandex_query::get_products_by_brand_id(store.as_ref(), id).await?))
}
