//! Catalog and alias configuration types.
//!
//! These are the immutable inputs to index construction. The engine never
//! derives them: the catalog comes from an upstream data source, the alias
//! table is curated by hand. Metadata is opaque JSON the engine carries
//! through without inspecting (price, colors, set membership, whatever the
//! caller attaches).

use serde::{Deserialize, Serialize};

/// One canonical catalog entry. Canonical names are unique within a
/// catalog; [`crate::Index::build`] rejects duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), metadata: None }
    }

    pub fn with_metadata(name: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self { name: name.into(), metadata: Some(metadata) }
    }
}

/// A fixed nickname mapped to exactly one canonical name ("bob" ->
/// "Dark Confidant"). Keys are compared case- and diacritic-insensitively;
/// an alias hit bypasses all fuzzy logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub nickname: String,
    pub target: String,
}

impl Alias {
    pub fn new(nickname: impl Into<String>, target: impl Into<String>) -> Self {
        Self { nickname: nickname.into(), target: target.into() }
    }
}

/// Parse a catalog snapshot from its JSON form: an array of entries, each
/// `{"name": ..., "metadata": ...?}`.
pub fn catalog_from_json(json: &str) -> Result<Vec<CatalogEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse an alias snapshot from its JSON form: an array of
/// `{"nickname": ..., "target": ...}` pairs.
pub fn aliases_from_json(json: &str) -> Result<Vec<Alias>, serde_json::Error> {
    serde_json::from_str(json)
}
