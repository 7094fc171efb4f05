//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `brandex-store-sqlite`).
//! Higher layers (`brandex-query`, `brandex-api`) depend on this abstraction,
//! not on any concrete backend.
//!
//! Records cross the trait boundary as plain JSON objects. Link columns are
//! written as `{ "id": <uuid> }` references and read back the same way unless
//! the caller asked for them to be expanded via [`Select`].

use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result, schema::Table};

/// A single row, keyed by column name.
pub type Record = serde_json::Map<String, Value>;

// ─── Typed records ───────────────────────────────────────────────────────────

/// A typed view over the rows of one table.
pub trait Entity: DeserializeOwned {
  const TABLE: Table;

  fn id(&self) -> Uuid;

  /// Decode an owned entity from a store record.
  fn from_record(record: Record) -> Result<Self> {
    Ok(serde_json::from_value(Value::Object(record))?)
  }
}

/// Serialise an input struct into the column map handed to the store.
pub fn to_record<T: Serialize>(input: &T) -> Result<Record> {
  match serde_json::to_value(input)? {
    Value::Object(map) => Ok(map),
    Value::Array(_) => Err(Error::NotAnObject("array")),
    Value::String(_) => Err(Error::NotAnObject("string")),
    Value::Number(_) => Err(Error::NotAnObject("number")),
    Value::Bool(_) => Err(Error::NotAnObject("bool")),
    Value::Null => Err(Error::NotAnObject("null")),
  }
}

// ─── Filters ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
  /// Exact match. A `null` value matches unset columns.
  Equals(Value),
  /// Case-insensitive substring match on a text column.
  IContains(String),
  /// Set membership. An empty set matches nothing.
  AnyOf(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
  pub column:    String,
  pub condition: Condition,
}

/// A conjunction of per-column clauses. The empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
  clauses: Vec<Clause>,
}

impl Filter {
  pub fn new() -> Self { Self::default() }

  pub fn equals(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
    self.with(column, Condition::Equals(value.into()))
  }

  /// Match rows whose link column `column` refers to `id`.
  pub fn links_to(self, column: impl Into<String>, id: Uuid) -> Self {
    self.equals(column, id.to_string())
  }

  pub fn icontains(self, column: impl Into<String>, needle: impl Into<String>) -> Self {
    self.with(column, Condition::IContains(needle.into()))
  }

  pub fn any_of<V: Into<Value>>(
    self,
    column: impl Into<String>,
    values: impl IntoIterator<Item = V>,
  ) -> Self {
    let values = values.into_iter().map(Into::into).collect();
    self.with(column, Condition::AnyOf(values))
  }

  pub fn clauses(&self) -> &[Clause] { &self.clauses }

  pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

  fn with(mut self, column: impl Into<String>, condition: Condition) -> Self {
    self.clauses.push(Clause { column: column.into(), condition });
    self
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
  Asc,
  Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
  pub column: String,
  pub order:  Order,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub size:   usize,
  pub offset: usize,
}

/// Which link columns to replace with the full linked record.
///
/// Every plain column is always returned; only the listed links are expanded,
/// one level deep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
  pub expand: Vec<String>,
}

impl Select {
  pub fn expand<I, S>(links: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self { expand: links.into_iter().map(Into::into).collect() }
  }
}

/// Parameters for [`RecordStore::query`]. Without a page the query is
/// unbounded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
  pub filter: Filter,
  pub sort:   Option<Sort>,
  pub page:   Option<Page>,
  pub select: Select,
}

impl Query {
  pub fn new(filter: Filter) -> Self { Self { filter, ..Self::default() } }

  pub fn sorted(mut self, column: impl Into<String>, order: Order) -> Self {
    self.sort = Some(Sort { column: column.into(), order });
    self
  }

  pub fn paged(mut self, size: usize, offset: usize) -> Self {
    self.page = Some(Page { size, offset });
    self
  }

  pub fn select(mut self, select: Select) -> Self {
    self.select = select;
    self
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a hosted record service.
///
/// Each method is a single round trip: a read together with its link
/// expansions, or a whole batch create, is answered in one call. The store
/// assigns `id` and `created_at` on create and rejects columns that the
/// [`Table`] does not declare.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve one record by id. Returns `None` if not found.
  fn read<'a>(
    &'a self,
    table: Table,
    id: Uuid,
    select: &'a Select,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Retrieve every record matching `query.filter`, honouring the optional
  /// sort and page.
  fn query<'a>(
    &'a self,
    table: Table,
    query: &'a Query,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + 'a;

  /// Create one record per entry of `rows` and return them in the same order.
  fn create(
    &self,
    table: Table,
    rows: Vec<Record>,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Overwrite the given columns of an existing record.
  ///
  /// Returns `None`, and changes nothing, if `id` does not exist.
  fn update(
    &self,
    table: Table,
    id: Uuid,
    fields: Record,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;

  /// Delete the listed records and return how many existed.
  fn delete(
    &self,
    table: Table,
    ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
