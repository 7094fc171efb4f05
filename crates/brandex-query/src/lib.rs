//! Data access layer for the Brandex brand directory.
//!
//! One async function per read or write use case. Every function takes the
//! record store as its first argument; callers decide its lifetime (the
//! server keeps one per process). Results are owned entity values decoded at
//! this boundary, so nothing returned here holds on to the store.
//!
//! Two operations carry real logic: [`replace_tags`], which reconciles a
//! brand's tag assignments to a desired set with the minimal add/remove
//! delta, and [`upsert_brand_mark_sources`], which replaces a brand's mark
//! sources wholesale. Neither is atomic; see their docs.

mod records;

pub mod brands;
pub mod error;
pub mod form;
pub mod locations;
pub mod mark_sources;
pub mod params;
pub mod products;
pub mod reports;
pub mod tags;

pub use brands::{get_brand, get_brands, patch_brand, post_brand};
pub use error::{Error, Result};
pub use form::{BrandForm, Choice, brand_form};
pub use locations::{get_locations, post_location};
pub use mark_sources::{get_brand_mark_sources, upsert_brand_mark_sources};
pub use params::{BrandQuery, LookupQuery};
pub use products::{get_products, get_products_by_brand_id};
pub use reports::post_report;
pub use tags::{
  TagChanges, get_brand_tags, get_tag_by_name, get_tags, post_brand_tag, post_tag, replace_tags,
};
