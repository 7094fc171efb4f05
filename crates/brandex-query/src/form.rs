//! Defaults for the admin brand editor.

use brandex_core::{Entity, Link, RecordStore, brand::Brand, location::Location, tag::BrandTag};
use serde::Serialize;
use uuid::Uuid;

use crate::{Result, brands::get_brand, tags::get_brand_tags};

/// One option of a picker: the record id and the name shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
  pub value: Uuid,
  pub label: String,
}

/// Initial values of the brand editor. Empty strings and a zero price read as
/// unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandForm {
  pub name:        Option<String>,
  pub price:       Option<i64>,
  pub image_url:   Option<String>,
  #[serde(with = "brandex_core::flag")]
  pub marked:      bool,
  pub mark_reason: Option<String>,
  pub location:    Option<Choice>,
  pub owned_by:    Option<Choice>,
  pub tags:        Vec<Choice>,
}

fn non_empty(value: Option<String>) -> Option<String> { value.filter(|s| !s.is_empty()) }

/// A link as a picker choice. Unexpanded links keep their id with an empty
/// label.
fn choice<T: Entity>(link: &Link<T>, label: impl FnOnce(&T) -> Option<String>) -> Choice {
  Choice {
    value: link.id(),
    label: link.expanded().and_then(label).unwrap_or_default(),
  }
}

fn tag_choice(row: &BrandTag) -> Option<Choice> {
  row
    .tag
    .as_ref()
    .map(|tag| choice(tag, |t| t.name.clone()))
}

/// Editor defaults for brand `id`, or `None` if there is no such brand.
pub async fn brand_form<S: RecordStore>(store: &S, id: Uuid) -> Result<Option<BrandForm>> {
  let Some(brand) = get_brand(store, id).await? else {
    return Ok(None);
  };
  let tags = get_brand_tags(store, id).await?;

  let Brand {
    name,
    price,
    marked,
    image_url,
    mark_reason,
    location,
    owned_by,
    ..
  } = brand;

  Ok(Some(BrandForm {
    name: non_empty(name),
    price: price.filter(|p| *p != 0),
    image_url: non_empty(image_url),
    marked,
    mark_reason: non_empty(mark_reason),
    location: location
      .as_ref()
      .map(|l| choice(l, |l: &Location| Some(l.name.clone()))),
    owned_by: owned_by.as_ref().map(|b| choice(b, |b| b.name.clone())),
    tags: tags.iter().filter_map(tag_choice).collect(),
  }))
}
