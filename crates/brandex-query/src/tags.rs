//! Tags and their assignment to brands.

use std::collections::HashSet;

use brandex_core::{
  LinkRef, RecordStore, Table,
  schema::CREATED_AT,
  store::{Filter, Order, Query, Select},
  tag::{BrandTag, Tag},
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{
  Error, Result,
  brands::ensure_brand,
  params::{DEFAULT_LOOKUP_PAGE_SIZE, LookupQuery, search_term},
  records,
};

// ─── Tags ────────────────────────────────────────────────────────────────────

pub async fn get_tags<S: RecordStore>(store: &S, params: &LookupQuery) -> Result<Vec<Tag>> {
  let mut filter = Filter::new();
  if let Some(term) = search_term(&params.search) {
    filter = filter.icontains("name", term);
  }
  let query = Query::new(filter).paged(params.size.unwrap_or(DEFAULT_LOOKUP_PAGE_SIZE), 0);
  records::query(store, &query).await
}

/// The one tag named exactly `name`.
///
/// Tag names are not unique at the storage level, so both an absent and a
/// duplicated name are errors.
pub async fn get_tag_by_name<S: RecordStore>(store: &S, name: &str) -> Result<Tag> {
  let query = Query::new(Filter::new().equals("name", name));
  let mut tags: Vec<Tag> = records::query(store, &query).await?;

  match tags.len() {
    0 => Err(Error::TagNotFound(name.to_owned())),
    1 => tags.pop().ok_or_else(|| Error::TagNotFound(name.to_owned())),
    count => Err(Error::AmbiguousTag { name: name.to_owned(), count }),
  }
}

pub async fn post_tag<S: RecordStore>(store: &S, name: &str) -> Result<Tag> {
  records::create_one(store, records::row([("name", Value::from(name))])).await
}

// ─── Brand tags ──────────────────────────────────────────────────────────────

fn brand_tag_row(brand_id: Uuid, tag_id: Uuid) -> brandex_core::Record {
  records::row([
    ("brand", LinkRef { id: brand_id }.into()),
    ("tag", LinkRef { id: tag_id }.into()),
  ])
}

/// Assign one tag to one brand. Does not check for an existing assignment.
///
/// Fails with [`Error::BrandNotFound`] or [`Error::MissingReference`] if
/// either side of the assignment does not exist.
pub async fn post_brand_tag<S: RecordStore>(store: &S, brand_id: Uuid, tag_id: Uuid) -> Result<BrandTag> {
  ensure_brand(store, brand_id).await?;
  records::ensure_exist::<_, Tag>(store, &[tag_id]).await?;
  records::create_one(store, brand_tag_row(brand_id, tag_id)).await
}

/// Every tag assignment of a brand, oldest first, with brand and tag
/// expanded.
pub async fn get_brand_tags<S: RecordStore>(store: &S, brand_id: Uuid) -> Result<Vec<BrandTag>> {
  let query = Query::new(Filter::new().links_to("brand", brand_id))
    .sorted(CREATED_AT, Order::Asc)
    .select(Select::expand(["brand", "tag"]));
  records::query(store, &query).await
}

/// What [`replace_tags`] changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagChanges {
  /// Join rows created, in the order their tags were requested.
  pub added:   Vec<BrandTag>,
  /// Ids of the join rows deleted.
  pub removed: Vec<Uuid>,
}

impl TagChanges {
  pub fn is_empty(&self) -> bool { self.added.is_empty() && self.removed.is_empty() }
}

/// Make the tags assigned to `brand_id` exactly `tag_ids`.
///
/// All current join rows of the brand are fetched. Rows whose tag is not
/// wanted are deleted, as are extra rows for a tag that is already assigned;
/// the oldest row for a kept tag survives. One row is created per wanted tag
/// that has none. Repeated ids in `tag_ids` count once.
///
/// The brand and every tag to be assigned are checked before anything is
/// written: an unknown brand is [`Error::BrandNotFound`] and unknown tag ids
/// are [`Error::MissingReference`], both leaving the store unchanged.
///
/// The delete and the create are separate store calls with nothing wrapping
/// them. A store failure in between leaves the brand with fewer tags than asked
/// for; calling again with the same set completes the change because the
/// delta is always recomputed from the stored rows.
#[tracing::instrument(skip(store, tag_ids), fields(wanted = tag_ids.len()))]
pub async fn replace_tags<S: RecordStore>(store: &S, brand_id: Uuid, tag_ids: &[Uuid]) -> Result<TagChanges> {
  ensure_brand(store, brand_id).await?;

  let current: Vec<BrandTag> = records::query(
    store,
    &Query::new(Filter::new().links_to("brand", brand_id)).sorted(CREATED_AT, Order::Asc),
  )
  .await?;

  let wanted: HashSet<Uuid> = tag_ids.iter().copied().collect();
  let mut kept = HashSet::new();
  let mut to_delete = Vec::new();

  for row in &current {
    match row.tag_id() {
      Some(tag) if wanted.contains(&tag) && kept.insert(tag) => {}
      _ => to_delete.push(row.id),
    }
  }

  let mut queued = HashSet::new();
  let new_tags: Vec<Uuid> = tag_ids
    .iter()
    .copied()
    .filter(|id| !kept.contains(id) && queued.insert(*id))
    .collect();
  records::ensure_exist::<_, Tag>(store, &new_tags).await?;

  let to_create: Vec<_> = new_tags
    .iter()
    .map(|id| brand_tag_row(brand_id, *id))
    .collect();

  tracing::debug!(
    current = current.len(),
    delete = to_delete.len(),
    create = to_create.len(),
    "reconciling brand tags"
  );

  records::delete(store, Table::BrandsTags, to_delete.clone()).await?;
  let added: Vec<BrandTag> = if to_create.is_empty() {
    Vec::new()
  } else {
    records::create(store, to_create).await?
  };

  Ok(TagChanges { added, removed: to_delete })
}
