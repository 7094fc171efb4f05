//! Error type for `brandex-store-sqlite`.

use brandex_core::Table;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("table {table} has no column {column:?}")]
  UnknownColumn { table: Table, column: String },

  #[error("invalid value for {table}.{column}: expected {expected}")]
  InvalidValue {
    table:    Table,
    column:   String,
    expected: &'static str,
  },

  /// Only link columns can be expanded.
  #[error("{table}.{column} is not a link column")]
  NotALink { table: Table, column: String },

  #[error("case-insensitive match on {table}.{column} requires a text column")]
  NotText { table: Table, column: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
