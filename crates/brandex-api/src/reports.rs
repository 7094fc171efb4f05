//! Handler for `POST /reports`.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use brandex_core::{RecordStore, report::ReportInput};

use crate::error::ApiError;

/// `POST /reports`: every field is optional; returns 201 + the stored report.
pub async fn create<S: RecordStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<ReportInput>,
) -> Result<impl IntoResponse, ApiError> {
  let report = brandex_query::post_report(store.as_ref(), &body).await?;
  Ok((StatusCode::CREATED, Json(report)))
}
