//! Integration tests for `SqliteStore` against an in-memory database.

use brandex_core::{
  Record, RecordStore, Table,
  store::{Filter, Order, Query, Select},
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(value: Value) -> Record {
  match value {
    Value::Object(map) => map,
    other => panic!("not an object: {other}"),
  }
}

fn id_of(record: &Record) -> Uuid {
  Uuid::parse_str(record["id"].as_str().unwrap()).unwrap()
}

async fn create_one(s: &SqliteStore, table: Table, value: Value) -> Record {
  s.create(table, vec![record(value)])
    .await
    .unwrap()
    .pop()
    .unwrap()
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn schema_matches_table_definitions() {
  let s = store().await;
  for table in Table::ALL {
    // Selecting every declared column fails to prepare if the DDL disagrees.
    let created = create_one(&s, table, json!({})).await;
    let rows = s.query(table, &Query::default()).await.unwrap();
    assert_eq!(rows.len(), 1, "{table}");
    assert_eq!(rows[0], created, "{table}");
    for column in table.columns() {
      assert!(rows[0].contains_key(column.name), "{table}.{}", column.name);
    }
  }
}

#[tokio::test]
async fn location_name_defaults_to_empty() {
  let s = store().await;
  let location = create_one(&s, Table::Locations, json!({})).await;
  assert_eq!(location["name"], json!(""));
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_read_brand() {
  let s = store().await;
  let brand = create_one(
    &s,
    Table::Brands,
    json!({ "name": "Acme", "price": 10, "marked": 0, "boosted": true, "imageUrl": "https://a/b.png" }),
  )
  .await;

  let fetched = s
    .read(Table::Brands, id_of(&brand), &Select::default())
    .await
    .unwrap()
    .unwrap();

  assert_eq!(fetched, brand);
  assert_eq!(fetched["name"], json!("Acme"));
  assert_eq!(fetched["price"], json!(10));
  assert_eq!(fetched["marked"], json!(0));
  assert_eq!(fetched["boosted"], json!(true));
  assert_eq!(fetched["imageUrl"], json!("https://a/b.png"));
  assert_eq!(fetched["location"], Value::Null);
  assert!(fetched["created_at"].as_str().is_some());
}

#[tokio::test]
async fn read_missing_returns_none() {
  let s = store().await;
  let result = s
    .read(Table::Brands, Uuid::new_v4(), &Select::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn batch_create_preserves_order() {
  let s = store().await;
  let created = s
    .create(
      Table::Tags,
      vec![record(json!({ "name": "a" })), record(json!({ "name": "b" })), record(json!({ "name": "c" }))],
    )
    .await
    .unwrap();
  let names: Vec<_> = created.iter().map(|r| r["name"].clone()).collect();
  assert_eq!(names, [json!("a"), json!("b"), json!("c")]);
}

#[tokio::test]
async fn create_empty_batch_is_a_no_op() {
  let s = store().await;
  assert!(s.create(Table::Tags, vec![]).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_unknown_and_server_columns() {
  let s = store().await;
  let err = s
    .create(Table::Tags, vec![record(json!({ "colour": "red" }))])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnknownColumn { table: Table::Tags, .. }));

  let err = s
    .create(Table::Tags, vec![record(json!({ "id": Uuid::new_v4() }))])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnknownColumn { .. }));
}

#[tokio::test]
async fn link_to_missing_record_is_rejected() {
  let s = store().await;
  let result = s
    .create(
      Table::Brands,
      vec![record(json!({ "name": "Acme", "location": { "id": Uuid::new_v4() } }))],
    )
    .await;
  assert!(matches!(result, Err(Error::Database(_))));
}

// ─── Links ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn links_are_references_unless_expanded() {
  let s = store().await;
  let location = create_one(&s, Table::Locations, json!({ "name": "Berlin" })).await;
  let owner = create_one(&s, Table::Brands, json!({ "name": "Holdings" })).await;
  let brand = create_one(
    &s,
    Table::Brands,
    json!({
      "name": "Acme",
      "location": { "id": location["id"] },
      "owned_by": owner["id"],
    }),
  )
  .await;

  assert_eq!(brand["location"], json!({ "id": location["id"] }));
  assert_eq!(brand["owned_by"], json!({ "id": owner["id"] }));

  let expanded = s
    .read(Table::Brands, id_of(&brand), &Select::expand(["location", "owned_by"]))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(expanded["location"], Value::Object(location));
  assert_eq!(expanded["owned_by"]["name"], json!("Holdings"));
}

#[tokio::test]
async fn expanding_a_plain_column_is_rejected() {
  let s = store().await;
  let err = s
    .read(Table::Brands, Uuid::new_v4(), &Select::expand(["name"]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotALink { .. }));
}

// ─── Query ───────────────────────────────────────────────────────────────────

async fn names_containing(s: &SqliteStore, needle: &str) -> Vec<String> {
  let rows = s
    .query(Table::Brands, &Query::new(Filter::new().icontains("name", needle)))
    .await
    .unwrap();
  let mut names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap().to_owned()).collect();
  names.sort();
  names
}

#[tokio::test]
async fn icontains_is_case_insensitive() {
  let s = store().await;
  for name in ["Acme", "ACME Foods", "Globex", "lacmeta", "ÉCOLE Supplies", "Ñandú"] {
    create_one(&s, Table::Brands, json!({ "name": name })).await;
  }

  assert_eq!(names_containing(&s, "aCmE").await, ["ACME Foods", "Acme", "lacmeta"]);
  assert_eq!(names_containing(&s, "école").await, ["ÉCOLE Supplies"]);
  assert_eq!(names_containing(&s, "ÑANDÚ").await, ["Ñandú"]);
}

#[tokio::test]
async fn icontains_requires_text_column() {
  let s = store().await;
  let err = s
    .query(Table::Brands, &Query::new(Filter::new().icontains("price", "1")))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotText { .. }));
}

#[tokio::test]
async fn equals_and_any_of_combine_as_conjunction() {
  let s = store().await;
  let a = create_one(&s, Table::Brands, json!({ "name": "a", "marked": 1 })).await;
  let b = create_one(&s, Table::Brands, json!({ "name": "b", "marked": 0 })).await;
  let c = create_one(&s, Table::Brands, json!({ "name": "c", "marked": 1 })).await;

  let filter = Filter::new()
    .equals("marked", 1)
    .any_of("id", [a["id"].clone(), b["id"].clone()]);
  let rows = s.query(Table::Brands, &Query::new(filter)).await.unwrap();
  assert_eq!(rows, vec![a]);

  let rows = s
    .query(Table::Brands, &Query::new(Filter::new().equals("price", Value::Null)))
    .await
    .unwrap();
  assert_eq!(rows.len(), 3);
  assert!(rows.contains(&c));
}

#[tokio::test]
async fn empty_any_of_matches_nothing() {
  let s = store().await;
  create_one(&s, Table::Tags, json!({ "name": "x" })).await;
  let rows = s
    .query(Table::Tags, &Query::new(Filter::new().any_of("id", Vec::<Value>::new())))
    .await
    .unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn filter_on_unknown_column_is_rejected() {
  let s = store().await;
  let err = s
    .query(Table::Tags, &Query::new(Filter::new().equals("colour", "red")))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UnknownColumn { .. }));
}

#[tokio::test]
async fn sort_desc_and_paging() {
  let s = store().await;
  for i in 0..5 {
    create_one(&s, Table::Brands, json!({ "name": format!("brand-{i}") })).await;
  }

  let query = Query::default().sorted("created_at", Order::Desc).paged(2, 1);
  let rows = s.query(Table::Brands, &query).await.unwrap();
  let names: Vec<_> = rows.iter().map(|r| r["name"].clone()).collect();
  assert_eq!(names, [json!("brand-3"), json!("brand-2")]);

  let query = Query::default().sorted("created_at", Order::Asc).paged(10, 3);
  let rows = s.query(Table::Brands, &query).await.unwrap();
  let names: Vec<_> = rows.iter().map(|r| r["name"].clone()).collect();
  assert_eq!(names, [json!("brand-3"), json!("brand-4")]);
}

#[tokio::test]
async fn query_filters_on_link_column() {
  let s = store().await;
  let brand = create_one(&s, Table::Brands, json!({ "name": "Acme" })).await;
  let other = create_one(&s, Table::Brands, json!({ "name": "Globex" })).await;
  for (b, url) in [(&brand, "https://a"), (&other, "https://b"), (&brand, "https://c")] {
    create_one(&s, Table::MarkSources, json!({ "url": url, "brand": { "id": b["id"] } })).await;
  }

  let query = Query::new(Filter::new().links_to("brand", id_of(&brand)))
    .select(Select::expand(["brand"]));
  let rows = s.query(Table::MarkSources, &query).await.unwrap();
  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| r["brand"]["name"] == json!("Acme")));
}

// ─── Update / delete ─────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_only_given_columns() {
  let s = store().await;
  let brand = create_one(&s, Table::Brands, json!({ "name": "Acme", "price": 10 })).await;

  let updated = s
    .update(Table::Brands, id_of(&brand), record(json!({ "marked": 1, "mark_reason": "counterfeit" })))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated["name"], json!("Acme"));
  assert_eq!(updated["price"], json!(10));
  assert_eq!(updated["marked"], json!(1));
  assert_eq!(updated["mark_reason"], json!("counterfeit"));
  assert_eq!(updated["created_at"], brand["created_at"]);
}

#[tokio::test]
async fn update_missing_returns_none_and_changes_nothing() {
  let s = store().await;
  create_one(&s, Table::Brands, json!({ "name": "Acme" })).await;

  let result = s
    .update(Table::Brands, Uuid::new_v4(), record(json!({ "name": "Changed" })))
    .await
    .unwrap();
  assert!(result.is_none());

  let rows = s.query(Table::Brands, &Query::default()).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["name"], json!("Acme"));
}

#[tokio::test]
async fn empty_update_reports_existence() {
  let s = store().await;
  let tag = create_one(&s, Table::Tags, json!({ "name": "x" })).await;
  let same = s
    .update(Table::Tags, id_of(&tag), Record::new())
    .await
    .unwrap();
  assert_eq!(same, Some(tag));
  let missing = s
    .update(Table::Tags, Uuid::new_v4(), Record::new())
    .await
    .unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn delete_counts_existing_rows() {
  let s = store().await;
  let a = create_one(&s, Table::Tags, json!({ "name": "a" })).await;
  let b = create_one(&s, Table::Tags, json!({ "name": "b" })).await;

  let deleted = s
    .delete(Table::Tags, vec![id_of(&a), Uuid::new_v4()])
    .await
    .unwrap();
  assert_eq!(deleted, 1);
  assert_eq!(s.delete(Table::Tags, vec![]).await.unwrap(), 0);

  let rows = s.query(Table::Tags, &Query::default()).await.unwrap();
  assert_eq!(rows, vec![b]);
}
