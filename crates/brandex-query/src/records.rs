//! Typed wrappers over [`RecordStore`] calls.
//!
//! These decode store records into entities and box store errors; they add no
//! behaviour of their own.

use std::collections::HashSet;

use brandex_core::{
  Entity, Record, RecordStore, Table,
  schema::ID,
  store::{Filter, Query, Select},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

pub async fn read<S, T>(store: &S, id: Uuid, select: &Select) -> Result<Option<T>>
where
  S: RecordStore,
  T: Entity,
{
  let record = store
    .read(T::TABLE, id, select)
    .await
    .map_err(Error::store)?;
  Ok(record.map(T::from_record).transpose()?)
}

pub async fn query<S, T>(store: &S, query: &Query) -> Result<Vec<T>>
where
  S: RecordStore,
  T: Entity,
{
  let records = store
    .query(T::TABLE, query)
    .await
    .map_err(Error::store)?;
  Ok(records.into_iter().map(T::from_record).collect::<Result<_, _>>()?)
}

pub async fn create<S, T>(store: &S, rows: Vec<Record>) -> Result<Vec<T>>
where
  S: RecordStore,
  T: Entity,
{
  let records = store
    .create(T::TABLE, rows)
    .await
    .map_err(Error::store)?;
  Ok(records.into_iter().map(T::from_record).collect::<Result<_, _>>()?)
}

pub async fn create_one<S, T>(store: &S, row: Record) -> Result<T>
where
  S: RecordStore,
  T: Entity,
{
  create(store, vec![row])
    .await?
    .pop()
    .ok_or(Error::EmptyCreate(T::TABLE))
}

pub async fn update<S, T>(store: &S, id: Uuid, fields: Record) -> Result<Option<T>>
where
  S: RecordStore,
  T: Entity,
{
  let record = store
    .update(T::TABLE, id, fields)
    .await
    .map_err(Error::store)?;
  Ok(record.map(T::from_record).transpose()?)
}

pub async fn delete<S: RecordStore>(store: &S, table: Table, ids: Vec<Uuid>) -> Result<usize> {
  if ids.is_empty() {
    return Ok(0);
  }
  store.delete(table, ids).await.map_err(Error::store)
}

/// Fail with [`Error::MissingReference`] unless every id in `ids` names a
/// record of `T`. One query regardless of how many ids are given.
pub async fn ensure_exist<S, T>(store: &S, ids: &[Uuid]) -> Result<()>
where
  S: RecordStore,
  T: Entity,
{
  if ids.is_empty() {
    return Ok(());
  }

  let filter = Filter::new().any_of(ID, ids.iter().map(Uuid::to_string));
  let found: HashSet<Uuid> = store
    .query(T::TABLE, &Query::new(filter))
    .await
    .map_err(Error::store)?
    .iter()
    .filter_map(|record| record.get(ID)?.as_str()?.parse().ok())
    .collect();

  let mut reported = HashSet::new();
  let missing: Vec<Uuid> = ids
    .iter()
    .copied()
    .filter(|id| !found.contains(id) && reported.insert(*id))
    .collect();

  if missing.is_empty() {
    Ok(())
  } else {
    Err(Error::MissingReference { table: T::TABLE, ids: missing })
  }
}

/// A column map from literal `(column, value)` pairs.
pub fn row<const N: usize>(fields: [(&str, Value); N]) -> Record {
  fields
    .into_iter()
    .map(|(column, value)| (column.to_owned(), value))
    .collect()
}
