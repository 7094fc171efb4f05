//! JSON REST API for Brandex.
//!
//! Exposes an axum [`Router`] backed by any [`RecordStore`]. Every handler is
//! a thin wrapper over one `brandex-query` function. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", brandex_api::api_router(store.clone()))
//! ```

pub mod admin;
pub mod brands;
pub mod error;
pub mod locations;
pub mod products;
pub mod reports;
pub mod tags;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use brandex_core::RecordStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Brands
    .route("/brands", get(brands::list::<S>).post(brands::create::<S>))
    .route("/brands/{id}", get(brands::get_one::<S>).patch(brands::patch::<S>))
    .route(
      "/brands/{id}/mark-sources",
      get(brands::mark_sources::<S>).put(brands::replace_mark_sources::<S>),
    )
    .route(
      "/brands/{id}/tags",
      get(tags::for_brand::<S>)
        .post(tags::assign::<S>)
        .put(tags::replace::<S>),
    )
    .route("/brands/{id}/products", get(products::for_brand::<S>))
    // Admin
    .route("/admin/brands/{id}/form", get(admin::brand_form::<S>))
    // Tags
    .route("/tags", get(tags::list::<S>).post(tags::create::<S>))
    .route("/tags/by-name/{name}", get(tags::by_name::<S>))
    // Locations
    .route("/locations", get(locations::list::<S>).post(locations::create::<S>))
    // Products
    .route("/products", get(products::list::<S>))
    // Reports
    .route("/reports", post(reports::create::<S>))
    .with_state(store)
}
