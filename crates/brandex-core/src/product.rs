//! Products sold under a brand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Link, Table, brand::Brand, store::Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  pub name:       Option<String>,
  #[serde(rename = "imageUrl")]
  pub image_url:  Option<String>,
  pub brand:      Option<Link<Brand>>,
}

impl Entity for Product {
  const TABLE: Table = Table::Products;

  fn id(&self) -> Uuid { self.id }
}
