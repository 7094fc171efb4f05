//! Product listings.

use brandex_core::{
  RecordStore,
  product::Product,
  store::{Filter, Query, Select},
};
use uuid::Uuid;

use crate::{Result, records};

pub async fn get_products<S: RecordStore>(store: &S) -> Result<Vec<Product>> {
  let query = Query::default().select(Select::expand(["brand"]));
  records::query(store, &query).await
}

pub async fn get_products_by_brand_id<S: RecordStore>(store: &S, brand_id: Uuid) -> Result<Vec<Product>> {
  let query = Query::new(Filter::new().links_to("brand", brand_id)).select(Select::expand(["brand"]));
  records::query(store, &query).await
}
