//! Which requests may skip authentication.
//!
//! A route pattern is either a literal path or, when it ends in `(.*)`, a
//! path prefix. Only safe methods are ever admitted on a public route;
//! anything that writes needs credentials.

use axum::http::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
  Exact(String),
  Prefix(String),
}

impl RoutePattern {
  pub fn parse(pattern: &str) -> Self {
    match pattern.strip_suffix("(.*)") {
      Some(prefix) => RoutePattern::Prefix(prefix.to_owned()),
      None => RoutePattern::Exact(pattern.to_owned()),
    }
  }

  pub fn matches(&self, path: &str) -> bool {
    match self {
      RoutePattern::Exact(p) => path == p,
      RoutePattern::Prefix(p) => path.starts_with(p.as_str()),
    }
  }
}

/// Route patterns readable without credentials when none are configured.
pub fn default_public_routes() -> Vec<String> {
  [
    "/api/brands(.*)",
    "/api/products(.*)",
    "/api/tags(.*)",
    "/api/locations(.*)",
    "/health",
  ]
  .into_iter()
  .map(str::to_owned)
  .collect()
}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
  public: Vec<RoutePattern>,
}

impl AccessPolicy {
  pub fn new<I, P>(patterns: I) -> Self
  where
    I: IntoIterator<Item = P>,
    P: AsRef<str>,
  {
    Self {
      public: patterns
        .into_iter()
        .map(|p| RoutePattern::parse(p.as_ref()))
        .collect(),
    }
  }

  pub fn is_public(&self, method: &Method, path: &str) -> bool {
    let safe = matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS);
    safe && self.public.iter().any(|p| p.matches(path))
  }
}
