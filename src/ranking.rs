//! Match scoring.
//!
//! Candidates are ordered by a lexicographic tuple where higher-priority
//! signals always dominate lower ones: an exact hit ALWAYS beats a prefix
//! hit, one edit ALWAYS beats two, and so on down to name length. Derived
//! `Ord` gives the comparison; lower = better. The final alphabetical
//! tie-break happens at sort time in the assembler, so identical queries
//! against the same index always produce identical orderings.

use crate::candidate::MatchStrategy;

/// Lexicographic candidate score. Field order (most to least important):
///
/// 1. `strategy` — alias < exact < prefix < stem < fuzzy
/// 2. `edits` — total Damerau-Levenshtein edits across the query's tokens
/// 3. `partial` — 0 when a prefix hit covers whole words, 1 when the last
///    query token stops mid-word
/// 4. `name_len` — shorter canonical names win remaining ties
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchScore {
    pub strategy: MatchStrategy,
    pub edits: u8,
    pub partial: u8,
    pub name_len: u16,
}

impl MatchScore {
    pub(crate) fn exact(name_len: u16) -> Self {
        Self { strategy: MatchStrategy::Exact, edits: 0, partial: 0, name_len }
    }

    pub(crate) fn prefix(partial: u8, name_len: u16) -> Self {
        Self { strategy: MatchStrategy::Prefix, edits: 0, partial, name_len }
    }

    pub(crate) fn stem(name_len: u16) -> Self {
        Self { strategy: MatchStrategy::Stem, edits: 0, partial: 0, name_len }
    }

    pub(crate) fn fuzzy(edits: u8, name_len: u16) -> Self {
        Self { strategy: MatchStrategy::Fuzzy, edits, partial: 0, name_len }
    }
}

/// Per-token edit budget. Tokens of three characters or fewer only ever
/// match exactly (or by prefix in the prefix strategy) — fuzzing "of"
/// would drown the results in false positives. Longer tokens tolerate two
/// edits, enough for "womds" -> "winds" and "rogh" -> "rath".
pub(crate) fn max_token_edits(token_chars: usize) -> u8 {
    if token_chars <= 3 {
        0
    } else {
        2
    }
}

/// Combined edit budget summed across all tokens of a query, scaling with
/// query length: a 13-character query may spend 4 edits spread over its
/// words, while a short single word never gets more than 2.
pub(crate) fn combined_edit_budget(query_chars: usize) -> u8 {
    ((query_chars / 3).min(u8::MAX as usize) as u8).max(2)
}

/// Damerau-Levenshtein edit distance (optimal string alignment) with
/// threshold pruning. Insertions, deletions, substitutions, and adjacent
/// transpositions each count as one edit. Returns `Some(distance)` when
/// distance <= `max_edits`, `None` otherwise; rows whose minimum exceeds
/// the bound abort early.
pub fn edit_distance_bounded(a: &str, b: &str, max_edits: u8) -> Option<u8> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let bound = max_edits as usize;

    if a.len().abs_diff(b.len()) > bound {
        return None;
    }

    let width = b.len() + 1;
    let mut two_back = vec![0usize; width];
    let mut prev: Vec<usize> = (0..width).collect();
    let mut row = vec![0usize; width];

    for i in 1..=a.len() {
        row[0] = i;
        let mut row_min = i;

        for j in 1..=b.len() {
            let substitution = prev[j - 1] + usize::from(a[i - 1] != b[j - 1]);
            let mut cost = substitution.min(prev[j] + 1).min(row[j - 1] + 1);

            let transposed =
                i >= 2 && j >= 2 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1];
            if transposed {
                cost = cost.min(two_back[j - 2] + 1);
            }

            row[j] = cost;
            row_min = row_min.min(cost);
        }

        if row_min > bound {
            return None;
        }

        std::mem::swap(&mut two_back, &mut prev);
        std::mem::swap(&mut prev, &mut row);
    }

    let distance = prev[b.len()];
    (distance <= bound).then_some(distance as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── edit_distance_bounded tests ──────────────────────────────

    #[test]
    fn test_edit_distance_identical() {
        assert_eq!(edit_distance_bounded("upheaval", "upheaval", 2), Some(0));
    }

    #[test]
    fn test_edit_distance_single_substitution() {
        assert_eq!(edit_distance_bounded("ashenmmor", "ashenmoor", 2), Some(1));
    }

    #[test]
    fn test_edit_distance_single_insertion() {
        assert_eq!(edit_distance_bounded("narcomeba", "narcomoeba", 2), Some(1));
    }

    #[test]
    fn test_edit_distance_single_deletion() {
        assert_eq!(edit_distance_bounded("gourger", "gouger", 2), Some(1));
    }

    #[test]
    fn test_edit_distance_transposition_is_one_edit() {
        assert_eq!(edit_distance_bounded("devler", "delver", 1), Some(1));
        assert_eq!(edit_distance_bounded("uphaeval", "upheaval", 1), Some(1));
    }

    #[test]
    fn test_edit_distance_two_substitutions() {
        assert_eq!(edit_distance_bounded("womds", "winds", 2), Some(2));
        assert_eq!(edit_distance_bounded("rogh", "rath", 2), Some(2));
    }

    #[test]
    fn test_edit_distance_exceeds_bound() {
        assert_eq!(edit_distance_bounded("womds", "winds", 1), None);
        assert_eq!(edit_distance_bounded("upheaval", "skullclamp", 2), None);
    }

    #[test]
    fn test_edit_distance_length_prune() {
        assert_eq!(edit_distance_bounded("uphe", "upheaval", 2), None);
    }

    #[test]
    fn test_edit_distance_empty_strings() {
        assert_eq!(edit_distance_bounded("", "", 0), Some(0));
        assert_eq!(edit_distance_bounded("of", "", 2), Some(2));
        assert_eq!(edit_distance_bounded("rath", "", 2), None);
    }

    // ── budget tests ─────────────────────────────────────────────

    #[test]
    fn test_max_token_edits_graduation() {
        assert_eq!(max_token_edits(1), 0);
        assert_eq!(max_token_edits(3), 0);
        assert_eq!(max_token_edits(4), 2);
        assert_eq!(max_token_edits(12), 2);
    }

    #[test]
    fn test_combined_budget_scales_with_length() {
        // "womds of rogh" = 13 chars, needs 4 edits in total
        assert_eq!(combined_edit_budget(13), 4);
        assert_eq!(combined_edit_budget(8), 2);
        assert_eq!(combined_edit_budget(4), 2);
    }

    // ── MatchScore ordering tests ────────────────────────────────

    #[test]
    fn test_strategy_dominates_edits() {
        let exact = MatchScore::exact(30);
        let fuzzy = MatchScore::fuzzy(0, 5);
        assert!(exact < fuzzy, "exact must beat fuzzy regardless of name length");
    }

    #[test]
    fn test_fewer_edits_beat_shorter_name() {
        let one_edit = MatchScore::fuzzy(1, 30);
        let two_edits = MatchScore::fuzzy(2, 5);
        assert!(one_edit < two_edits);
    }

    #[test]
    fn test_whole_word_prefix_beats_partial() {
        let whole = MatchScore::prefix(0, 27);
        let partial = MatchScore::prefix(1, 15);
        assert!(whole < partial, "word-extension prefix must beat mid-word prefix");
    }

    #[test]
    fn test_shorter_name_breaks_ties() {
        let short = MatchScore::fuzzy(1, 8);
        let long = MatchScore::fuzzy(1, 17);
        assert!(short < long);
    }
}
