//! The matching cascade and result assembly.
//!
//! A normalized query runs through five strategies in priority order:
//! alias, exact, prefix, stem, fuzzy. An alias hit short-circuits the
//! whole cascade; the rest accumulate candidates, which the assembler
//! collapses per entry (keeping the best score), orders, and truncates.
//! All of it is a pure function of the query and one immutable
//! [`Index`] snapshot, so concurrent queries need no locking and repeated
//! queries yield identical results.

use std::collections::HashMap;

use serde::Serialize;

use crate::candidate::Candidate;
use crate::indexer::Index;
use crate::normalize::{normalize, stem};
use crate::ranking::{combined_edit_budget, max_token_edits, MatchScore};

/// Maximum candidates returned for one query.
pub(crate) const MAX_RESULTS: usize = 50;

/// Ordered, deduplicated resolution of one query. Every element is a
/// canonical catalog name; there are no placeholder slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    matches: Vec<String>,
}

impl SearchResult {
    /// The highest-confidence canonical name, or `None` for no match.
    pub fn best_match(&self) -> Option<&str> {
        self.matches.first().map(String::as_str)
    }

    /// All distinct matches, highest-confidence first.
    pub fn all_matches(&self) -> &[String] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Resolve a raw query against one index snapshot.
pub fn run_query(index: &Index, raw: &str) -> SearchResult {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return SearchResult::default();
    }

    // An alias hit is the best match and the only match.
    if let Some(idx) = index.alias_lookup(&normalized) {
        return SearchResult { matches: vec![index.name(idx).to_string()] };
    }

    let query_tokens: Vec<&str> = normalized.split(' ').collect();

    let mut candidates: Vec<Candidate> = Vec::new();
    if let Some(idx) = index.exact(&normalized) {
        candidates.push(Candidate::new(idx, MatchScore::exact(name_chars(index, idx))));
    }
    candidates.extend(prefix_matches(index, &query_tokens));
    candidates.extend(stem_matches(index, &query_tokens));
    candidates.extend(fuzzy_matches(index, &normalized, &query_tokens));

    assemble(index, candidates)
}

/// Prefix strategy: each query token must be a prefix of the entry token
/// in the same position. This covers both the whole-string prefix case
/// ("jeskai asc" -> "jeskai ascendancy") and word-extension ("rofellos"
/// -> "rofellos llanowar emissary"). A hit whose query tokens all equal
/// their counterparts scores `partial = 0` and outranks one whose last
/// token stops mid-word.
fn prefix_matches(index: &Index, query_tokens: &[&str]) -> Vec<Candidate> {
    let first = match query_tokens.first() {
        Some(first) => first,
        None => return Vec::new(),
    };

    let mut out = Vec::new();
    for &idx in index.prefix_range(first) {
        let entry_tokens = index.entry_tokens(idx);
        if entry_tokens.len() < query_tokens.len() {
            continue;
        }

        let mut partial = 0u8;
        let mut aligned = true;
        for (q, e) in query_tokens.iter().zip(entry_tokens) {
            if e == q {
                continue;
            }
            if e.starts_with(q) {
                partial = 1;
            } else {
                aligned = false;
                break;
            }
        }
        if !aligned {
            continue;
        }
        // Identical token lists are exact territory, not a prefix hit.
        if partial == 0 && entry_tokens.len() == query_tokens.len() {
            continue;
        }
        out.push(Candidate::new(idx, MatchScore::prefix(partial, name_chars(index, idx))));
    }
    out
}

/// Stem strategy: every query token's stem must appear somewhere in the
/// entry, order-independent, so "Frantic Salvaging" reaches "Frantic
/// Salvage". Posting lists are sorted; intersect smallest-first.
fn stem_matches(index: &Index, query_tokens: &[&str]) -> Vec<Candidate> {
    let mut postings: Vec<&[usize]> = Vec::with_capacity(query_tokens.len());
    for token in query_tokens {
        match index.by_stem(&stem(token)) {
            Some(posting) => postings.push(posting),
            None => return Vec::new(),
        }
    }
    postings.sort_unstable_by_key(|p| p.len());

    let mut hits: Vec<usize> = match postings.first() {
        Some(first) => first.to_vec(),
        None => return Vec::new(),
    };
    for posting in &postings[1..] {
        hits.retain(|e| posting.binary_search(e).is_ok());
        if hits.is_empty() {
            return Vec::new();
        }
    }

    hits.into_iter()
        .map(|idx| Candidate::new(idx, MatchScore::stem(name_chars(index, idx))))
        .collect()
}

/// Fuzzy strategy: every query token must land in the same entry within
/// its per-token edit budget, and the edits summed across tokens must fit
/// the combined budget. Two separate typos in two words still resolve
/// ("womds of rogh" -> "Winds of Rath") while unrelated strings do not.
fn fuzzy_matches(index: &Index, normalized: &str, query_tokens: &[&str]) -> Vec<Candidate> {
    let budget = combined_edit_budget(normalized.chars().count());

    let mut combined: Option<HashMap<usize, u8>> = None;
    for token in query_tokens {
        let per_token = index.fuzzy_candidates(token, max_token_edits(token.chars().count()));
        if per_token.is_empty() {
            return Vec::new();
        }
        combined = Some(match combined {
            None => per_token,
            Some(acc) => {
                let mut merged = HashMap::with_capacity(per_token.len().min(acc.len()));
                for (entry, dist) in per_token {
                    if let Some(total) = acc.get(&entry) {
                        merged.insert(entry, total.saturating_add(dist));
                    }
                }
                if merged.is_empty() {
                    return Vec::new();
                }
                merged
            }
        });
    }

    combined
        .map(|totals| {
            totals
                .into_iter()
                .filter(|&(_, edits)| edits <= budget)
                .map(|(idx, edits)| {
                    Candidate::new(idx, MatchScore::fuzzy(edits, name_chars(index, idx)))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Collapse candidates per entry keeping the best score, order by score
/// with an alphabetical tie-break on canonical name, cap at
/// [`MAX_RESULTS`].
fn assemble(index: &Index, candidates: Vec<Candidate>) -> SearchResult {
    let mut best: HashMap<usize, MatchScore> = HashMap::with_capacity(candidates.len());
    for candidate in candidates {
        best.entry(candidate.entry)
            .and_modify(|score| {
                if candidate.score < *score {
                    *score = candidate.score;
                }
            })
            .or_insert(candidate.score);
    }

    let mut ranked: Vec<(MatchScore, usize)> =
        best.into_iter().map(|(entry, score)| (score, entry)).collect();
    ranked.sort_unstable_by(|a, b| {
        a.0.cmp(&b.0).then_with(|| index.name(a.1).cmp(index.name(b.1)))
    });
    ranked.truncate(MAX_RESULTS);

    SearchResult {
        matches: ranked.into_iter().map(|(_, entry)| index.name(entry).to_string()).collect(),
    }
}

fn name_chars(index: &Index, idx: usize) -> u16 {
    index.name(idx).chars().count().min(u16::MAX as usize) as u16
}
