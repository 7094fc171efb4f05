//! Core types and trait definitions for the Brandex brand directory.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It declares the schema, the entity types decoded from it, and the
//! [`RecordStore`](store::RecordStore) contract that storage backends
//! implement.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod brand;
pub mod error;
pub mod flag;
pub mod link;
pub mod location;
pub mod product;
pub mod report;
pub mod schema;
pub mod store;
pub mod tag;

pub use error::{Error, Result};
pub use link::{Link, LinkRef};
pub use schema::Table;
pub use store::{Entity, Record, RecordStore};
