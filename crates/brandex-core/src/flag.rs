//! Serde helpers for 0/1 integer flags.
//!
//! Flags are persisted and emitted as `0`/`1`. Decoding also accepts JSON
//! booleans and the strings `"0"`/`"1"` that HTML forms submit. `null` reads
//! as unset.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_i64(i64::from(*value))
}

/// An unset flag reads as `false`.
pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
  Ok(option::deserialize(d)?.unwrap_or(false))
}

/// The same encoding for optional flags on partial-update inputs.
pub mod option {
  use super::*;

  pub fn serialize<S: Serializer>(value: &Option<bool>, s: S) -> Result<S::Ok, S::Error> {
    match value {
      Some(v) => s.serialize_some(&i64::from(*v)),
      None => s.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Bool(bool),
      Int(i64),
      Text(String),
    }

    match Option::<Raw>::deserialize(d)? {
      None => Ok(None),
      Some(Raw::Bool(b)) => Ok(Some(b)),
      Some(Raw::Int(0)) => Ok(Some(false)),
      Some(Raw::Int(1)) => Ok(Some(true)),
      Some(Raw::Int(other)) => {
        Err(D::Error::custom(format!("flag must be 0 or 1, got {other}")))
      }
      Some(Raw::Text(s)) => match s.trim() {
        "0" | "false" => Ok(Some(false)),
        "1" | "true" => Ok(Some(true)),
        other => Err(D::Error::custom(format!("flag must be 0 or 1, got {other:?}"))),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use serde::{Deserialize, Serialize};
  use serde_json::json;

  #[derive(Debug, Serialize, Deserialize)]
  struct Row {
    #[serde(default, with = "crate::flag")]
    marked: bool,
  }

  #[test]
  fn accepts_ints_bools_and_form_strings() {
    for (raw, expected) in [
      (json!(1), true),
      (json!(0), false),
      (json!(true), true),
      (json!("1"), true),
      (json!("0"), false),
      (json!(null), false),
    ] {
      let row: Row = serde_json::from_value(json!({ "marked": raw })).unwrap();
      assert_eq!(row.marked, expected, "input {raw}");
    }
  }

  #[test]
  fn missing_flag_is_false() {
    let row: Row = serde_json::from_value(json!({})).unwrap();
    assert!(!row.marked);
  }

  #[test]
  fn rejects_other_integers() {
    assert!(serde_json::from_value::<Row>(json!({ "marked": 2 })).is_err());
    assert!(serde_json::from_value::<Row>(json!({ "marked": "yes" })).is_err());
  }

  #[test]
  fn serialises_as_integer() {
    let value = serde_json::to_value(Row { marked: true }).unwrap();
    assert_eq!(value, json!({ "marked": 1 }));
  }
}
