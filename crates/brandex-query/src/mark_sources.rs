//! Evidence cited for marked brands.

use brandex_core::{
  LinkRef, RecordStore, Table,
  brand::{MarkSource, MarkSourceInput},
  schema::CREATED_AT,
  store::{Filter, Order, Query},
};
use uuid::Uuid;

use crate::{Result, brands::ensure_brand, records};

/// Every mark source of a brand, oldest first.
pub async fn get_brand_mark_sources<S: RecordStore>(store: &S, brand_id: Uuid) -> Result<Vec<MarkSource>> {
  let query = Query::new(Filter::new().links_to("brand", brand_id)).sorted(CREATED_AT, Order::Asc);
  records::query(store, &query).await
}

/// Replace the mark sources of a brand with `sources`.
///
/// Every existing source is deleted before the new ones are created; nothing
/// is merged and nothing is kept. The two steps are separate store calls, so
/// a failure after the delete leaves the brand with no sources until the
/// call is repeated. An unknown brand fails with
/// [`Error::BrandNotFound`](crate::Error::BrandNotFound) before anything is
/// deleted.
#[tracing::instrument(skip(store, sources), fields(count = sources.len()))]
pub async fn upsert_brand_mark_sources<S: RecordStore>(
  store: &S,
  brand_id: Uuid,
  sources: &[MarkSourceInput],
) -> Result<Vec<MarkSource>> {
  ensure_brand(store, brand_id).await?;

  let existing: Vec<MarkSource> = records::query(store, &Query::new(Filter::new().links_to("brand", brand_id))).await?;
  let removed = records::delete(
    store,
    Table::MarkSources,
    existing.iter().map(|s| s.id).collect(),
  )
  .await?;

  let rows: Vec<_> = sources
    .iter()
    .map(|s| {
      records::row([
        ("name", s.name.clone().into()),
        ("url", s.url.clone().into()),
        ("brand", LinkRef { id: brand_id }.into()),
      ])
    })
    .collect();

  let created: Vec<MarkSource> = if rows.is_empty() {
    Vec::new()
  } else {
    records::create(store, rows).await?
  };

  tracing::debug!(removed, created = created.len(), "replaced mark sources");
  Ok(created)
}
