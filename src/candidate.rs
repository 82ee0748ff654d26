//! Transient scored match produced by one strategy of the cascade.
//!
//! Several candidates may point at the same catalog entry through
//! different strategies; the assembler collapses them, keeping the best
//! score per entry.

use crate::ranking::MatchScore;

/// Which strategy of the cascade produced a candidate. Declaration order
/// is priority order — derived `Ord` makes alias beat exact beat prefix
/// beat stem beat fuzzy.
///
/// `Alias` reserves priority 0 but never reaches candidate assembly: an
/// alias hit short-circuits the cascade in `run_query` before any
/// candidate is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchStrategy {
    Alias,
    Exact,
    Prefix,
    Stem,
    Fuzzy,
}

/// A scored match against one catalog entry, identified by its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub entry: usize,
    pub score: MatchScore,
}

impl Candidate {
    pub fn new(entry: usize, score: MatchScore) -> Self {
        Self { entry, score }
    }
}
