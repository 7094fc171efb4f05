//! Locations a brand can be associated with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Table, store::Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  /// Never null; stored as the empty string when not given.
  #[serde(default)]
  pub name:       String,
}

impl Entity for Location {
  const TABLE: Table = Table::Locations;

  fn id(&self) -> Uuid { self.id }
}
