//! Link-valued columns.
//!
//! A link is stored as the id of the target record. Reads return it either
//! as a bare `{ "id": ... }` reference or, when the link was selected for
//! expansion, as the full linked record.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::store::Entity;

/// A reference to another record by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
  pub id: Uuid,
}

impl From<LinkRef> for Value {
  fn from(r: LinkRef) -> Self { json!({ "id": r.id }) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link<T> {
  /// The linked record, expanded in the same round trip.
  Expanded(Box<T>),
  Ref(LinkRef),
}

impl<T: Entity> Link<T> {
  pub fn id(&self) -> Uuid {
    match self {
      Link::Expanded(record) => record.id(),
      Link::Ref(r) => r.id,
    }
  }

  pub fn expanded(&self) -> Option<&T> {
    match self {
      Link::Expanded(record) => Some(record),
      Link::Ref(_) => None,
    }
  }
}

/// Serialise an optional id as a `{ "id": ... }` link reference.
///
/// Used on input structs so that writes establish relationships by id only.
pub fn serialize_ref<S: Serializer>(id: &Option<Uuid>, s: S) -> Result<S::Ok, S::Error> {
  match id {
    Some(id) => s.serialize_some(&LinkRef { id: *id }),
    None => s.serialize_none(),
  }
}
