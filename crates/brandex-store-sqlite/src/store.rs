//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use brandex_core::{
  Record, RecordStore, Table,
  schema::{CREATED_AT, ColumnKind, ID},
  store::{Condition, Filter, Order, Query, Select},
};
use chrono::Utc;
use rusqlite::{
  OptionalExtension as _,
  functions::{Context, FunctionFlags},
  types::Value as SqlValue,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    decode_row, encode_dt, encode_fields, encode_uuid, encode_value, lookup_column, quote,
    select_list,
  },
  schema::SCHEMA,
};

// ─── Statement plans ─────────────────────────────────────────────────────────

/// A link column to replace with the record it points at.
#[derive(Clone, Copy)]
struct Expansion {
  column: &'static str,
  target: Table,
}

/// SQL text plus positional parameters, built and validated on the async side
/// before being shipped to the database thread.
struct Plan {
  sql:    String,
  params: Vec<SqlValue>,
}

fn expansions(table: Table, select: &Select) -> Result<Vec<Expansion>> {
  select
    .expand
    .iter()
    .map(|name| {
      let column = table
        .column(name)
        .ok_or_else(|| Error::UnknownColumn { table, column: name.clone() })?;
      match column.kind {
        ColumnKind::Link(target) => Ok(Expansion { column: column.name, target }),
        _ => Err(Error::NotALink { table, column: name.clone() }),
      }
    })
    .collect()
}

/// Render `filter` as a `WHERE` clause (empty for the empty filter), pushing
/// bound values onto `params`.
fn where_clause(table: Table, filter: &Filter, params: &mut Vec<SqlValue>) -> Result<String> {
  let mut conds = Vec::with_capacity(filter.clauses().len());

  for clause in filter.clauses() {
    let column = lookup_column(table, &clause.column)?;
    let ident = quote(column.name);

    match &clause.condition {
      Condition::Equals(Value::Null) => conds.push(format!("{ident} IS NULL")),
      Condition::Equals(value) => {
        params.push(encode_value(table, &column, value)?);
        conds.push(format!("{ident} = ?"));
      }
      Condition::IContains(needle) => {
        if column.kind != ColumnKind::Text {
          return Err(Error::NotText { table, column: clause.column.clone() });
        }
        params.push(SqlValue::Text(needle.clone()));
        conds.push(format!("instr(fold({ident}), fold(?)) > 0"));
      }
      Condition::AnyOf(values) if values.is_empty() => conds.push("0".to_owned()),
      Condition::AnyOf(values) => {
        for value in values {
          params.push(encode_value(table, &column, value)?);
        }
        let marks = vec!["?"; values.len()].join(", ");
        conds.push(format!("{ident} IN ({marks})"));
      }
    }
  }

  Ok(if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  })
}

fn query_plan(table: Table, query: &Query) -> Result<Plan> {
  let mut params = Vec::new();
  let where_sql = where_clause(table, &query.filter, &mut params)?;

  // rowid breaks ties between rows created within the same instant.
  let order_sql = match &query.sort {
    Some(sort) => {
      let column = lookup_column(table, &sort.column)?;
      let dir = match sort.order {
        Order::Asc => "ASC",
        Order::Desc => "DESC",
      };
      format!("ORDER BY {} {dir}, rowid {dir}", quote(column.name))
    }
    None => "ORDER BY rowid ASC".to_owned(),
  };

  let page_sql = match query.page {
    Some(page) => {
      params.push(SqlValue::Integer(page.size as i64));
      params.push(SqlValue::Integer(page.offset as i64));
      "LIMIT ? OFFSET ?"
    }
    None => "",
  };

  Ok(Plan {
    sql: format!(
      "SELECT {} FROM {} {where_sql} {order_sql} {page_sql}",
      select_list(table),
      quote(table.name()),
    ),
    params,
  })
}

fn read_sql(table: Table) -> String {
  format!("SELECT {} FROM {} WHERE {} = ?1", select_list(table), quote(table.name()), quote(ID))
}

// ─── Database-thread helpers ─────────────────────────────────────────────────

/// `fold(text)`: Unicode lowercase, used for case-insensitive matching.
/// SQLite's own `lower()` only folds ASCII letters. `NULL` stays `NULL`.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "fold",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx: &Context<'_>| {
      let text: Option<String> = ctx.get(0)?;
      Ok(text.map(|t| t.to_lowercase()))
    },
  )
}

fn read_row(
  conn: &rusqlite::Connection,
  table: Table,
  id: &str,
) -> rusqlite::Result<Option<Record>> {
  conn
    .query_row(&read_sql(table), rusqlite::params![id], |row| decode_row(table, row))
    .optional()
}

/// Replace each expanded link's `{ "id": ... }` with the linked record.
/// Dangling links are left as bare references.
fn expand_links(
  conn: &rusqlite::Connection,
  record: &mut Record,
  expand: &[Expansion],
) -> rusqlite::Result<()> {
  for e in expand {
    let linked_id = record
      .get(e.column)
      .and_then(|v| v.get(ID))
      .and_then(Value::as_str)
      .map(str::to_owned);

    if let Some(linked_id) = linked_id
      && let Some(linked) = read_row(conn, e.target, &linked_id)?
    {
      record.insert(e.column.to_owned(), Value::Object(linked));
    }
  }
  Ok(())
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by a single SQLite file.
///
/// Clones share the same underlying connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn read(&self, table: Table, id: Uuid, select: &Select) -> Result<Option<Record>> {
    let expand = expansions(table, select)?;
    let id_str = encode_uuid(id);

    let record = self
      .conn
      .call(move |conn| {
        let Some(mut record) = read_row(conn, table, &id_str)? else {
          return Ok(None);
        };
        expand_links(conn, &mut record, &expand)?;
        Ok(Some(record))
      })
      .await?;

    Ok(record)
  }

  async fn query(&self, table: Table, query: &Query) -> Result<Vec<Record>> {
    let expand = expansions(table, &query.select)?;
    let Plan { sql, params } = query_plan(table, query)?;

    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let mut records = stmt
          .query_map(rusqlite::params_from_iter(params.iter()), |row| {
            decode_row(table, row)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        for record in &mut records {
          expand_links(conn, record, &expand)?;
        }
        Ok(records)
      })
      .await?;

    Ok(records)
  }

  async fn create(&self, table: Table, rows: Vec<Record>) -> Result<Vec<Record>> {
    if rows.is_empty() {
      return Ok(Vec::new());
    }

    let mut plans = Vec::with_capacity(rows.len());
    for row in &rows {
      let id = encode_uuid(Uuid::new_v4());
      let fields = encode_fields(table, row)?;

      let mut columns = vec![quote(ID), quote(CREATED_AT)];
      let mut params = vec![SqlValue::Text(id.clone()), SqlValue::Text(encode_dt(Utc::now()))];
      for (name, value) in fields {
        columns.push(quote(name));
        params.push(value);
      }

      let marks = vec!["?"; columns.len()].join(", ");
      let sql = format!(
        "INSERT INTO {} ({}) VALUES ({marks})",
        quote(table.name()),
        columns.join(", "),
      );
      plans.push((id, Plan { sql, params }));
    }

    let records = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for (_, plan) in &plans {
          tx.execute(&plan.sql, rusqlite::params_from_iter(plan.params.iter()))?;
        }

        let mut records = Vec::with_capacity(plans.len());
        for (id, _) in &plans {
          if let Some(record) = read_row(&tx, table, id)? {
            records.push(record);
          }
        }
        tx.commit()?;
        Ok(records)
      })
      .await?;

    tracing::debug!(%table, count = records.len(), "created records");
    Ok(records)
  }

  async fn update(&self, table: Table, id: Uuid, fields: Record) -> Result<Option<Record>> {
    let fields = encode_fields(table, &fields)?;
    let id_str = encode_uuid(id);

    let assignments = fields
      .iter()
      .map(|(name, _)| format!("{} = ?", quote(name)))
      .collect::<Vec<_>>()
      .join(", ");
    let mut params: Vec<SqlValue> = fields.into_iter().map(|(_, v)| v).collect();
    params.push(SqlValue::Text(id_str.clone()));
    let sql = format!(
      "UPDATE {} SET {assignments} WHERE {} = ?",
      quote(table.name()),
      quote(ID),
    );

    let record = self
      .conn
      .call(move |conn| {
        // An empty update still has to report whether the record exists.
        if params.len() > 1 {
          let changed = conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?;
          if changed == 0 {
            return Ok(None);
          }
        }
        Ok(read_row(conn, table, &id_str)?)
      })
      .await?;

    Ok(record)
  }

  async fn delete(&self, table: Table, ids: Vec<Uuid>) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }

    let params: Vec<SqlValue> = ids
      .into_iter()
      .map(|id| SqlValue::Text(encode_uuid(id)))
      .collect();
    let marks = vec!["?"; params.len()].join(", ");
    let sql = format!(
      "DELETE FROM {} WHERE {} IN ({marks})",
      quote(table.name()),
      quote(ID),
    );

    let deleted = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params_from_iter(params.iter()))?))
      .await?;

    tracing::debug!(%table, deleted, "deleted records");
    Ok(deleted)
  }
}
