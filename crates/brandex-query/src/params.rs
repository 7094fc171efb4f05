//! Listing parameters.
//!
//! Every field is optional; an omitted field adds no constraint.

/// Page size of the brand listing when none is given.
pub const DEFAULT_BRAND_PAGE_SIZE: usize = 4;

/// Page size of tag and location lookups when none is given.
pub const DEFAULT_LOOKUP_PAGE_SIZE: usize = 10;

/// Parameters for [`get_brands`](crate::get_brands).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandQuery {
  pub size:      Option<usize>,
  pub offset:    Option<usize>,
  /// Case-insensitive substring of the brand name. Empty means no filter.
  pub search:    Option<String>,
  pub is_marked: Option<bool>,
}

/// Parameters for the tag and location lookups used by pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQuery {
  pub size:   Option<usize>,
  pub search: Option<String>,
}

/// The search term, unless it is absent or empty.
pub(crate) fn search_term(search: &Option<String>) -> Option<&str> {
  search.as_deref().filter(|s| !s.is_empty())
}
