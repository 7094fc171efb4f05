//! Encoding and decoding helpers between JSON record values and the plain
//! SQLite column representations.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that text order
//! is chronological. Ids and link columns are stored as hyphenated lowercase
//! UUID strings. Flags are stored as `0`/`1` integers.

use brandex_core::{
  Record, Table,
  schema::{CREATED_AT, Column, ColumnKind, ID},
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value as SqlValue;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid / DateTime<Utc> ────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

// ─── Columns ─────────────────────────────────────────────────────────────────

/// Resolve a column name for filtering or sorting.
///
/// `id` is accepted and compares like a link value; `created_at` compares as
/// text.
pub fn lookup_column(table: Table, name: &str) -> Result<Column> {
  match name {
    ID => Ok(Column { name: ID, kind: ColumnKind::Link(table) }),
    CREATED_AT => Ok(Column { name: CREATED_AT, kind: ColumnKind::Text }),
    _ => writable_column(table, name),
  }
}

/// Resolve a column name for create and update; `id` and `created_at` are
/// server-assigned and therefore rejected.
pub fn writable_column(table: Table, name: &str) -> Result<Column> {
  table
    .column(name)
    .copied()
    .ok_or_else(|| Error::UnknownColumn { table, column: name.to_owned() })
}

pub fn quote(ident: &str) -> String { format!("\"{ident}\"") }

/// `"id", "created_at", <declared columns...>` in storage order.
pub fn select_list(table: Table) -> String {
  [ID, CREATED_AT]
    .into_iter()
    .chain(table.columns().iter().map(|c| c.name))
    .map(quote)
    .collect::<Vec<_>>()
    .join(", ")
}

// ─── Values ──────────────────────────────────────────────────────────────────

fn expected(kind: ColumnKind) -> &'static str {
  match kind {
    ColumnKind::Text => "a string",
    ColumnKind::Int => "an integer",
    ColumnKind::Bool => "a boolean or 0/1",
    ColumnKind::Link(_) => "a uuid or {\"id\": uuid}",
  }
}

/// Convert a JSON value into the SQLite value stored for `column`.
pub fn encode_value(table: Table, column: &Column, value: &Value) -> Result<SqlValue> {
  let invalid = || Error::InvalidValue {
    table,
    column: column.name.to_owned(),
    expected: expected(column.kind),
  };

  match (column.kind, value) {
    (_, Value::Null) => Ok(SqlValue::Null),
    (ColumnKind::Text, Value::String(s)) => Ok(SqlValue::Text(s.clone())),
    (ColumnKind::Int, Value::Number(n)) => {
      n.as_i64().map(SqlValue::Integer).ok_or_else(invalid)
    }
    (ColumnKind::Int | ColumnKind::Bool, Value::Bool(b)) => {
      Ok(SqlValue::Integer(i64::from(*b)))
    }
    (ColumnKind::Bool, Value::Number(n)) => match n.as_i64() {
      Some(i @ (0 | 1)) => Ok(SqlValue::Integer(i)),
      _ => Err(invalid()),
    },
    (ColumnKind::Link(_), Value::String(s)) => {
      Ok(SqlValue::Text(encode_uuid(Uuid::parse_str(s)?)))
    }
    (ColumnKind::Link(_), Value::Object(reference)) => match reference.get(ID) {
      Some(Value::String(s)) => Ok(SqlValue::Text(encode_uuid(Uuid::parse_str(s)?))),
      _ => Err(invalid()),
    },
    _ => Err(invalid()),
  }
}

/// Convert a stored SQLite value back into its JSON record form.
pub fn decode_value(kind: ColumnKind, raw: SqlValue) -> Value {
  match (kind, raw) {
    (_, SqlValue::Null) => Value::Null,
    (ColumnKind::Bool, SqlValue::Integer(i)) => Value::Bool(i != 0),
    (ColumnKind::Link(_), SqlValue::Text(id)) => json!({ "id": id }),
    (_, SqlValue::Integer(i)) => Value::from(i),
    (_, SqlValue::Real(f)) => Value::from(f),
    (_, SqlValue::Text(s)) => Value::String(s),
    (_, SqlValue::Blob(_)) => Value::Null,
  }
}

/// Encode the column map of a create or update into `(column, value)` pairs.
pub fn encode_fields(table: Table, fields: &Record) -> Result<Vec<(&'static str, SqlValue)>> {
  fields
    .iter()
    .map(|(name, value)| {
      let column = writable_column(table, name)?;
      Ok((column.name, encode_value(table, &column, value)?))
    })
    .collect()
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Decode a row selected with [`select_list`] into a record.
pub fn decode_row(table: Table, row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
  let mut record = Record::new();
  record.insert(ID.to_owned(), Value::String(row.get(0)?));
  record.insert(CREATED_AT.to_owned(), Value::String(row.get(1)?));
  for (i, column) in table.columns().iter().enumerate() {
    let raw: SqlValue = row.get(i + 2)?;
    record.insert(column.name.to_owned(), decode_value(column.kind, raw));
  }
  Ok(record)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timestamps_sort_as_text() {
    let earlier = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
      .unwrap()
      .with_timezone(&Utc);
    let later = DateTime::parse_from_rfc3339("2024-05-01T12:00:00.1Z")
      .unwrap()
      .with_timezone(&Utc);
    assert!(encode_dt(later) > encode_dt(earlier));
  }

  #[test]
  fn link_accepts_reference_and_plain_id() {
    let id = Uuid::new_v4();
    let column = writable_column(Table::Brands, "location").unwrap();
    let from_ref = encode_value(Table::Brands, &column, &json!({ "id": id })).unwrap();
    let from_str = encode_value(Table::Brands, &column, &json!(id.to_string())).unwrap();
    assert_eq!(from_ref, SqlValue::Text(encode_uuid(id)));
    assert_eq!(from_ref, from_str);
  }

  #[test]
  fn rejects_mistyped_values() {
    let price = writable_column(Table::Brands, "price").unwrap();
    assert!(matches!(
      encode_value(Table::Brands, &price, &json!("ten")),
      Err(Error::InvalidValue { .. })
    ));
    let location = writable_column(Table::Brands, "location").unwrap();
    assert!(matches!(
      encode_value(Table::Brands, &location, &json!("not-a-uuid")),
      Err(Error::Uuid(_))
    ));
  }

  #[test]
  fn server_assigned_columns_are_not_writable() {
    assert!(matches!(
      writable_column(Table::Tags, ID),
      Err(Error::UnknownColumn { .. })
    ));
    assert!(lookup_column(Table::Tags, ID).is_ok());
    assert!(lookup_column(Table::Tags, CREATED_AT).is_ok());
  }
}
