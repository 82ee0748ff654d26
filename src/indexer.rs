//! Immutable catalog index.
//!
//! All lookup structures are materialized once from a catalog + alias
//! snapshot and never mutate afterwards, so any number of threads can
//! query the same [`Index`] without locking. A catalog refresh builds a
//! whole new index (see [`crate::Searcher::rebuild`]); malformed input is
//! a build-time configuration error, never a query-time failure.

use std::collections::HashMap;

use rayon::prelude::*;
use thiserror::Error;

use crate::models::{Alias, CatalogEntry};
use crate::normalize::{normalize, stem};
use crate::ranking::edit_distance_bounded;

/// Error type for index construction.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error("catalog entry {0:?} has no searchable characters")]
    BlankName(String),
    #[error("duplicate canonical name after normalization: {0:?} collides with {1:?}")]
    DuplicateName(String, String),
    #[error("alias {nickname:?} points at unknown canonical name {target:?}")]
    UnknownAliasTarget { nickname: String, target: String },
    #[error("alias {0:?} maps to more than one canonical name")]
    DuplicateAlias(String),
}

/// A catalog entry with its cached normalized form.
#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: CatalogEntry,
    normalized: String,
    tokens: Vec<String>,
}

/// A unique normalized token with the entries it appears in.
#[derive(Debug, Clone)]
struct Token {
    text: String,
    entries: Vec<usize>,
}

/// Read-only lookup structures over one catalog + alias snapshot.
///
/// Entries are addressed by dense index; lookups return entry indices and
/// [`Index::name`] / [`Index::entry`] resolve them back.
#[derive(Debug)]
pub struct Index {
    entries: Vec<IndexedEntry>,
    /// Normalized full name -> entry.
    exact: HashMap<String, usize>,
    /// Normalized alias key -> entry.
    aliases: HashMap<String, usize>,
    /// Stem -> sorted entry indices containing a token with that stem.
    stems: HashMap<String, Vec<usize>>,
    /// Unique tokens with posting lists, plus lookup by text and by
    /// character length. Length buckets bound the fuzzy scan: a token of
    /// n chars with budget d only compares against buckets n-d ..= n+d.
    tokens: Vec<Token>,
    token_ids: HashMap<String, usize>,
    tokens_by_len: HashMap<usize, Vec<usize>>,
    /// Entry indices sorted by normalized name, for prefix ranges.
    names_sorted: Vec<usize>,
}

impl Index {
    /// Materialize an index from a catalog + alias snapshot.
    ///
    /// Fails on an empty catalog, a name that normalizes to nothing, two
    /// names that collide after normalization, an alias pointing at a
    /// name the catalog doesn't have, and an alias key mapped to two
    /// different targets. Nothing is silently dropped.
    pub fn build(catalog: &[CatalogEntry], alias_table: &[Alias]) -> Result<Self, IndexError> {
        if catalog.is_empty() {
            return Err(IndexError::EmptyCatalog);
        }

        let mut entries = Vec::with_capacity(catalog.len());
        let mut exact = HashMap::with_capacity(catalog.len());
        let mut stems: HashMap<String, Vec<usize>> = HashMap::new();
        let mut tokens: Vec<Token> = Vec::new();
        let mut token_ids: HashMap<String, usize> = HashMap::new();

        for (i, entry) in catalog.iter().enumerate() {
            let normalized = normalize(&entry.name);
            if normalized.is_empty() {
                return Err(IndexError::BlankName(entry.name.clone()));
            }
            if let Some(prev) = exact.insert(normalized.clone(), i) {
                return Err(IndexError::DuplicateName(
                    catalog[prev].name.clone(),
                    entry.name.clone(),
                ));
            }

            let entry_tokens: Vec<String> =
                normalized.split(' ').map(str::to_string).collect();
            for token in &entry_tokens {
                let posting = stems.entry(stem(token)).or_default();
                if posting.last() != Some(&i) {
                    posting.push(i);
                }

                let id = *token_ids.entry(token.clone()).or_insert_with(|| {
                    tokens.push(Token { text: token.clone(), entries: Vec::new() });
                    tokens.len() - 1
                });
                if tokens[id].entries.last() != Some(&i) {
                    tokens[id].entries.push(i);
                }
            }

            entries.push(IndexedEntry {
                entry: entry.clone(),
                normalized,
                tokens: entry_tokens,
            });
        }

        let mut tokens_by_len: HashMap<usize, Vec<usize>> = HashMap::new();
        for (id, token) in tokens.iter().enumerate() {
            tokens_by_len
                .entry(token.text.chars().count())
                .or_default()
                .push(id);
        }

        let mut names_sorted: Vec<usize> = (0..entries.len()).collect();
        names_sorted.sort_unstable_by(|&a, &b| entries[a].normalized.cmp(&entries[b].normalized));

        let mut aliases = HashMap::with_capacity(alias_table.len());
        for alias in alias_table {
            let target_idx = exact.get(&normalize(&alias.target)).copied().ok_or_else(|| {
                IndexError::UnknownAliasTarget {
                    nickname: alias.nickname.clone(),
                    target: alias.target.clone(),
                }
            })?;
            let key = normalize(&alias.nickname);
            if let Some(prev) = aliases.insert(key, target_idx) {
                if prev != target_idx {
                    return Err(IndexError::DuplicateAlias(alias.nickname.clone()));
                }
            }
        }

        Ok(Self {
            entries,
            exact,
            aliases,
            stems,
            tokens,
            token_ids,
            tokens_by_len,
            names_sorted,
        })
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical name of an entry.
    pub fn name(&self, idx: usize) -> &str {
        &self.entries[idx].entry.name
    }

    /// The full catalog entry, metadata included.
    pub fn entry(&self, idx: usize) -> &CatalogEntry {
        &self.entries[idx].entry
    }

    pub(crate) fn entry_tokens(&self, idx: usize) -> &[String] {
        &self.entries[idx].tokens
    }

    /// Entry whose normalized name equals `normalized`, if any.
    pub fn exact(&self, normalized: &str) -> Option<usize> {
        self.exact.get(normalized).copied()
    }

    /// Alias target for a folded (not stemmed) key, if any.
    pub fn alias_lookup(&self, normalized: &str) -> Option<usize> {
        self.aliases.get(normalized).copied()
    }

    /// Sorted entries containing a token with the given stem.
    pub fn by_stem(&self, stem: &str) -> Option<&[usize]> {
        self.stems.get(stem).map(Vec::as_slice)
    }

    /// Sorted entries containing exactly this normalized token.
    pub(crate) fn token_entries(&self, token: &str) -> Option<&[usize]> {
        self.token_ids
            .get(token)
            .map(|&id| self.tokens[id].entries.as_slice())
    }

    /// Entries containing a token within `max_edits` of `token`, with the
    /// smallest distance found per entry. A zero budget degenerates to the
    /// exact token posting list. The scan covers only length buckets that
    /// can be within the bound and parallelizes across them.
    pub fn fuzzy_candidates(&self, token: &str, max_edits: u8) -> HashMap<usize, u8> {
        let mut out = HashMap::new();
        if max_edits == 0 {
            if let Some(posting) = self.token_entries(token) {
                out.extend(posting.iter().map(|&e| (e, 0)));
            }
            return out;
        }

        let token_chars = token.chars().count();
        let lo = token_chars.saturating_sub(max_edits as usize);
        let hi = token_chars + max_edits as usize;
        let in_range: Vec<usize> = (lo..=hi)
            .filter_map(|len| self.tokens_by_len.get(&len))
            .flatten()
            .copied()
            .collect();

        let hits: Vec<(usize, u8)> = in_range
            .par_iter()
            .filter_map(|&id| {
                edit_distance_bounded(token, &self.tokens[id].text, max_edits)
                    .map(|dist| (id, dist))
            })
            .collect();

        for (id, dist) in hits {
            for &e in &self.tokens[id].entries {
                out.entry(e)
                    .and_modify(|best| {
                        if dist < *best {
                            *best = dist;
                        }
                    })
                    .or_insert(dist);
            }
        }
        out
    }

    /// Entries whose normalized name starts with `prefix`, as a slice of
    /// the name-sorted order.
    pub(crate) fn prefix_range(&self, prefix: &str) -> &[usize] {
        let start = self
            .names_sorted
            .partition_point(|&i| self.entries[i].normalized.as_str() < prefix);
        let len = self.names_sorted[start..]
            .partition_point(|&i| self.entries[i].normalized.starts_with(prefix));
        &self.names_sorted[start..start + len]
    }
}
