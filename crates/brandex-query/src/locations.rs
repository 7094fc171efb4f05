//! Location lookups.

use brandex_core::{
  RecordStore,
  location::Location,
  store::{Filter, Query},
};
use serde_json::Value;

use crate::{
  Result,
  params::{DEFAULT_LOOKUP_PAGE_SIZE, LookupQuery, search_term},
  records,
};

pub async fn get_locations<S: RecordStore>(store: &S, params: &LookupQuery) -> Result<Vec<Location>> {
  let mut filter = Filter::new();
  if let Some(term) = search_term(&params.search) {
    filter = filter.icontains("name", term);
  }
  let query = Query::new(filter).paged(params.size.unwrap_or(DEFAULT_LOOKUP_PAGE_SIZE), 0);
  records::query(store, &query).await
}

pub async fn post_location<S: RecordStore>(store: &S, name: &str) -> Result<Location> {
  records::create_one(store, records::row([("name", Value::from(name))])).await
}
