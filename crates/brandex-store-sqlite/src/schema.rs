//! SQL schema for the Brandex SQLite store.
//!
//! Column names and order must agree with `brandex_core::schema`; the
//! `schema_matches_table_definitions` test checks this.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS locations (
    id          TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC, fixed-width nanoseconds
    name        TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS tags (
    id          TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    name        TEXT
);

CREATE TABLE IF NOT EXISTS brands (
    id                TEXT PRIMARY KEY,
    created_at        TEXT NOT NULL,
    name              TEXT,
    price             INTEGER,
    marked            INTEGER,     -- 0 | 1
    \"imageUrl\"        TEXT,
    mark_reason       TEXT,
    location          TEXT REFERENCES locations(id),
    owned_by          TEXT REFERENCES brands(id),
    boosted           INTEGER,     -- 0 | 1
    brand_description TEXT
);

-- One row per (brand, tag) assignment. Rows are only ever deleted by tag
-- reconciliation.
CREATE TABLE IF NOT EXISTS brands_tags (
    id          TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    tag         TEXT REFERENCES tags(id),
    brand       TEXT REFERENCES brands(id)
);

CREATE TABLE IF NOT EXISTS mark_sources (
    id          TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    name        TEXT,
    url         TEXT,
    brand       TEXT REFERENCES brands(id)
);

CREATE TABLE IF NOT EXISTS products (
    id          TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    name        TEXT,
    \"imageUrl\"  TEXT,
    brand       TEXT REFERENCES brands(id)
);

CREATE TABLE IF NOT EXISTS reports (
    id          TEXT PRIMARY KEY,
    created_at  TEXT NOT NULL,
    name        TEXT,
    purpose     TEXT,
    \"imageUrl\"  TEXT,
    reason      TEXT,
    \"proofUrl\"  TEXT,
    alternative TEXT
);

CREATE INDEX IF NOT EXISTS brands_created_idx     ON brands(created_at);
CREATE INDEX IF NOT EXISTS brands_tags_brand_idx  ON brands_tags(brand);
CREATE INDEX IF NOT EXISTS mark_sources_brand_idx ON mark_sources(brand);
CREATE INDEX IF NOT EXISTS products_brand_idx     ON products(brand);

PRAGMA user_version = 1;
";
