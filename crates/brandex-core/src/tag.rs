//! Tags and the brand/tag join rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Link, Table, brand::Brand, store::Entity};

/// A free-form label. Names are unique by convention only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  pub name:       Option<String>,
}

impl Entity for Tag {
  const TABLE: Table = Table::Tags;

  fn id(&self) -> Uuid { self.id }
}

/// Associates one brand with one tag.
///
/// A row exists for a (brand, tag) pair exactly when the tag is assigned to
/// the brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandTag {
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  pub brand:      Option<Link<Brand>>,
  pub tag:        Option<Link<Tag>>,
}

impl BrandTag {
  pub fn tag_id(&self) -> Option<Uuid> { self.tag.as_ref().map(Link::id) }
}

impl Entity for BrandTag {
  const TABLE: Table = Table::BrandsTags;

  fn id(&self) -> Uuid { self.id }
}
