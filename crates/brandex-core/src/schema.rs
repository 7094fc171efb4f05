//! Table and column definitions for the brand directory.
//!
//! Storage backends use these definitions to validate column names and to
//! decode stored values; the data access layer names columns through them.
//! Every table additionally carries the server-assigned [`ID`] and
//! [`CREATED_AT`] columns, which are not listed here.

use serde::{Deserialize, Serialize};

/// Server-assigned record identifier column.
pub const ID: &str = "id";

/// Server-assigned creation timestamp column.
pub const CREATED_AT: &str = "created_at";

// ─── Tables ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
  Brands,
  Tags,
  BrandsTags,
  MarkSources,
  Locations,
  Products,
  Reports,
}

/// The storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
  Text,
  Int,
  Bool,
  /// A reference to a record in another (or the same) table, stored by id.
  Link(Table),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
  pub name: &'static str,
  pub kind: ColumnKind,
}

/// A link column on `table` that points back at the table it was computed
/// for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseLink {
  pub table:  Table,
  pub column: &'static str,
}

const fn text(name: &'static str) -> Column { Column { name, kind: ColumnKind::Text } }

const fn int(name: &'static str) -> Column { Column { name, kind: ColumnKind::Int } }

const fn boolean(name: &'static str) -> Column { Column { name, kind: ColumnKind::Bool } }

const fn link(name: &'static str, to: Table) -> Column {
  Column { name, kind: ColumnKind::Link(to) }
}

const BRANDS: &[Column] = &[
  text("name"),
  int("price"),
  // 0/1 flag; see `crate::flag`.
  int("marked"),
  text("imageUrl"),
  text("mark_reason"),
  link("location", Table::Locations),
  link("owned_by", Table::Brands),
  boolean("boosted"),
  text("brand_description"),
];

const TAGS: &[Column] = &[text("name")];

const BRANDS_TAGS: &[Column] = &[
  link("tag", Table::Tags),
  link("brand", Table::Brands),
];

const MARK_SOURCES: &[Column] = &[
  text("name"),
  text("url"),
  link("brand", Table::Brands),
];

const LOCATIONS: &[Column] = &[text("name")];

const PRODUCTS: &[Column] = &[
  text("name"),
  text("imageUrl"),
  link("brand", Table::Brands),
];

const REPORTS: &[Column] = &[
  text("name"),
  text("purpose"),
  text("imageUrl"),
  text("reason"),
  text("proofUrl"),
  text("alternative"),
];

impl Table {
  pub const ALL: [Table; 7] = [
    Table::Brands,
    Table::Tags,
    Table::BrandsTags,
    Table::MarkSources,
    Table::Locations,
    Table::Products,
    Table::Reports,
  ];

  /// The storage name of the table.
  pub fn name(self) -> &'static str {
    match self {
      Table::Brands => "brands",
      Table::Tags => "tags",
      Table::BrandsTags => "brands_tags",
      Table::MarkSources => "mark_sources",
      Table::Locations => "locations",
      Table::Products => "products",
      Table::Reports => "reports",
    }
  }

  /// User-writable columns, in declaration order.
  pub fn columns(self) -> &'static [Column] {
    match self {
      Table::Brands => BRANDS,
      Table::Tags => TAGS,
      Table::BrandsTags => BRANDS_TAGS,
      Table::MarkSources => MARK_SOURCES,
      Table::Locations => LOCATIONS,
      Table::Products => PRODUCTS,
      Table::Reports => REPORTS,
    }
  }

  pub fn column(self, name: &str) -> Option<&'static Column> {
    self.columns().iter().find(|c| c.name == name)
  }

  /// Every link column, across all tables, that targets `self`.
  pub fn reverse_links(self) -> Vec<ReverseLink> {
    Table::ALL
      .iter()
      .flat_map(|&table| {
        table.columns().iter().filter_map(move |c| match c.kind {
          ColumnKind::Link(to) if to == self => {
            Some(ReverseLink { table, column: c.name })
          }
          _ => None,
        })
      })
      .collect()
  }
}

impl std::fmt::Display for Table {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}
