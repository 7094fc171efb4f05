//! User-submitted reports about brands not yet in the directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Table, store::Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
  pub id:          Uuid,
  pub created_at:  DateTime<Utc>,
  pub name:        Option<String>,
  pub purpose:     Option<String>,
  #[serde(rename = "imageUrl")]
  pub image_url:   Option<String>,
  pub reason:      Option<String>,
  #[serde(rename = "proofUrl")]
  pub proof_url:   Option<String>,
  /// A suggested alternative brand.
  pub alternative: Option<String>,
}

impl Entity for Report {
  const TABLE: Table = Table::Reports;

  fn id(&self) -> Uuid { self.id }
}

/// Report fields as submitted; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInput {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub purpose:     Option<String>,
  #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
  pub image_url:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reason:      Option<String>,
  #[serde(rename = "proofUrl", skip_serializing_if = "Option::is_none")]
  pub proof_url:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub alternative: Option<String>,
}
