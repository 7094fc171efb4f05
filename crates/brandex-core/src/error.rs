//! Error types for `brandex-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("record input must serialise to a JSON object, got {0}")]
  NotAnObject(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
