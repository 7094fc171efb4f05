//! Brands and the evidence cited for marking them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Link, Table, location::Location, store::Entity};

/// A catalogued commercial brand.
///
/// A brand is *marked* when it has been identified as problematic; the
/// reason lives in `mark_reason` and the supporting citations are
/// [`MarkSource`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
  pub id:                Uuid,
  pub created_at:        DateTime<Utc>,
  pub name:              Option<String>,
  pub price:             Option<i64>,
  #[serde(default, with = "crate::flag")]
  pub marked:            bool,
  #[serde(rename = "imageUrl")]
  pub image_url:         Option<String>,
  pub mark_reason:       Option<String>,
  pub location:          Option<Link<Location>>,
  /// The brand that owns this one. Chains are kept acyclic on update.
  pub owned_by:          Option<Link<Brand>>,
  pub boosted:           Option<bool>,
  pub brand_description: Option<String>,
}

impl Entity for Brand {
  const TABLE: Table = Table::Brands;

  fn id(&self) -> Uuid { self.id }
}

/// Writable brand fields, shared by create and partial update.
///
/// `None` leaves a column untouched (or unset, on create). Links are given by
/// id and written as `{ "id": ... }` references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandInput {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price:             Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none", with = "crate::flag::option")]
  pub marked:            Option<bool>,
  #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
  pub image_url:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mark_reason:       Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "crate::link::serialize_ref")]
  pub location:          Option<Uuid>,
  #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "crate::link::serialize_ref")]
  pub owned_by:          Option<Uuid>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub boosted:           Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub brand_description: Option<String>,
}

// ─── Mark sources ────────────────────────────────────────────────────────────

/// A citation supporting why a brand is marked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkSource {
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  pub name:       Option<String>,
  pub url:        Option<String>,
  pub brand:      Option<Link<Brand>>,
}

impl Entity for MarkSource {
  const TABLE: Table = Table::MarkSources;

  fn id(&self) -> Uuid { self.id }
}

/// A mark source as submitted by an editor. Sources carry no identity of
/// their own; a brand's set is always replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkSourceInput {
  pub name: String,
  pub url:  String,
}
