//! Brand reads and writes.

use std::collections::HashSet;

use brandex_core::{
  RecordStore,
  brand::{Brand, BrandInput},
  location::Location,
  schema::CREATED_AT,
  store::{Filter, Order, Query, Select, to_record},
};
use uuid::Uuid;

use crate::{
  Error, Result,
  params::{BrandQuery, DEFAULT_BRAND_PAGE_SIZE, search_term},
  records,
};

/// Newest brands first, with owner and location expanded.
pub async fn get_brands<S: RecordStore>(store: &S, params: &BrandQuery) -> Result<Vec<Brand>> {
  let mut filter = Filter::new();
  if let Some(term) = search_term(&params.search) {
    filter = filter.icontains("name", term);
  }
  if let Some(marked) = params.is_marked {
    filter = filter.equals("marked", i64::from(marked));
  }

  let query = Query::new(filter)
    .sorted(CREATED_AT, Order::Desc)
    .paged(
      params.size.unwrap_or(DEFAULT_BRAND_PAGE_SIZE),
      params.offset.unwrap_or(0),
    )
    .select(Select::expand(["owned_by", "location"]));

  records::query(store, &query).await
}

/// A single brand with location and owner expanded, or `None`.
pub async fn get_brand<S: RecordStore>(store: &S, id: Uuid) -> Result<Option<Brand>> {
  records::read(store, id, &Select::expand(["location", "owned_by"])).await
}

/// Store a new brand.
///
/// Fails with [`Error::MissingReference`] if `location` or `owned_by` names a
/// record that does not exist; nothing is written in that case.
pub async fn post_brand<S: RecordStore>(store: &S, input: &BrandInput) -> Result<Brand> {
  check_links(store, input).await?;
  records::create_one(store, to_record(input)?).await
}

/// Overwrite the fields set in `input` on brand `id`.
///
/// Fails with [`Error::BrandNotFound`] if the brand does not exist, with
/// [`Error::MissingReference`] if a link in `input` names a missing record,
/// and with [`Error::OwnershipCycle`] if the new owner is the brand itself or
/// is (transitively) owned by it. The store is untouched in every case.
pub async fn patch_brand<S: RecordStore>(store: &S, id: Uuid, input: &BrandInput) -> Result<Brand> {
  if input.location.is_some() || input.owned_by.is_some() {
    ensure_brand(store, id).await?;
    check_links(store, input).await?;
  }
  if let Some(owner) = input.owned_by
    && owner_chain_reaches(store, owner, id).await?
  {
    return Err(Error::OwnershipCycle { brand: id, owner });
  }

  records::update(store, id, to_record(input)?)
    .await?
    .ok_or(Error::BrandNotFound(id))
}

/// [`Error::BrandNotFound`] unless brand `id` exists.
pub(crate) async fn ensure_brand<S: RecordStore>(store: &S, id: Uuid) -> Result<()> {
  match records::read::<_, Brand>(store, id, &Select::default()).await? {
    Some(_) => Ok(()),
    None => Err(Error::BrandNotFound(id)),
  }
}

async fn check_links<S: RecordStore>(store: &S, input: &BrandInput) -> Result<()> {
  if let Some(location) = input.location {
    records::ensure_exist::<_, Location>(store, &[location]).await?;
  }
  if let Some(owner) = input.owned_by {
    records::ensure_exist::<_, Brand>(store, &[owner]).await?;
  }
  Ok(())
}

/// Follow `owned_by` links from `start` and report whether `target` is on the
/// chain. Stops at a missing link or at a cycle that does not pass through
/// `target`.
async fn owner_chain_reaches<S: RecordStore>(store: &S, start: Uuid, target: Uuid) -> Result<bool> {
  let mut seen = HashSet::new();
  let mut current = Some(start);

  while let Some(id) = current {
    if id == target {
      return Ok(true);
    }
    if !seen.insert(id) {
      break;
    }
    current = records::read::<_, Brand>(store, id, &Select::default())
      .await?
      .and_then(|b| b.owned_by)
      .map(|link| link.id());
  }

  Ok(false)
}
