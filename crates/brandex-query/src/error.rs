//! Error type for `brandex-query`.

use brandex_core::Table;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The record store failed; propagated unchanged.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("record decode error: {0}")]
  Decode(#[from] brandex_core::Error),

  #[error("store returned no record for a create on {0}")]
  EmptyCreate(Table),

  #[error("brand not found: {0}")]
  BrandNotFound(Uuid),

  #[error("no tag named {0:?}")]
  TagNotFound(String),

  #[error("{count} tags named {name:?}")]
  AmbiguousTag { name: String, count: usize },

  /// A link in client input names records that do not exist.
  #[error("{table} has no records with ids {ids:?}")]
  MissingReference { table: Table, ids: Vec<Uuid> },

  #[error("brand {brand} cannot be owned by {owner}: ownership would form a cycle")]
  OwnershipCycle { brand: Uuid, owner: Uuid },
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
