//! Name and query normalization.
//!
//! Catalog entries, alias keys, and incoming queries all pass through the
//! same pipeline so comparison is apples-to-apples: lowercase, diacritics
//! folded to base Latin letters, apostrophes dropped, every other
//! non-alphanumeric run (including `/` split-name separators) collapsed to
//! a single space. Stemming is a separate per-token step so the lightly
//! normalized form stays available for alias and prefix lookup.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Minimum characters a stem must keep for a suffix rule to fire.
const MIN_STEM_LEN: usize = 3;

/// Suffixes stripped by [`stem`], longest first.
const SUFFIX_RULES: &[&str] = &[
    "ization", "ational", "fulness", "iveness", "ousness",
    "ment", "ing", "ion", "ity", "est", "ed", "er", "or", "ly",
];

/// Fold a raw name or query to its canonical comparison form.
///
/// "Jötun Grunt", "Far/Away", and "Smuggler's Copter" come out as
/// `jotun grunt`, `far away`, and `smugglers copter`. An empty or
/// all-punctuation input folds to the empty string.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.nfd().filter(|c| !is_combining_mark(*c)) {
        for lc in c.to_lowercase() {
            match lc {
                // Apostrophes vanish so "Rofellos's" folds to "rofelloss",
                // keeping the possessive a single token.
                '\'' | '\u{2019}' => {}
                c if c.is_alphanumeric() => push_base(&mut out, c),
                _ => {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
            }
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// NFD strips combining marks but leaves ligatures and crossed letters
/// whole; fold the handful that appear in real card names.
fn push_base(out: &mut String, c: char) {
    match c {
        'æ' => out.push_str("ae"),
        'œ' => out.push_str("oe"),
        'ß' => out.push_str("ss"),
        'ø' => out.push('o'),
        'đ' => out.push('d'),
        'ł' => out.push('l'),
        c => out.push(c),
    }
}

/// Normalize and split into word tokens. Empty input yields no tokens.
pub fn tokenize(raw: &str) -> Vec<String> {
    normalize(raw)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Reduce a normalized token to its morphological stem by suffix
/// stripping: plural `s` first (so "salvages" and "salvaging" meet),
/// then one rule from [`SUFFIX_RULES`], then a trailing `e`.
///
/// "salvaging", "salvage", and "salvages" all stem to `salvag`;
/// "constructor" and "construction" to `construct`. Tokens of three
/// characters or fewer are returned unchanged.
pub fn stem(word: &str) -> String {
    let mut w = word.to_string();
    if w.chars().count() <= MIN_STEM_LEN {
        return w;
    }
    if w.ends_with('s') && !w.ends_with("ss") && char_len(&w) - 1 >= MIN_STEM_LEN {
        w.pop();
    }
    for suffix in SUFFIX_RULES {
        if let Some(remaining) = w.strip_suffix(suffix) {
            if remaining.chars().count() >= MIN_STEM_LEN {
                w.truncate(w.len() - suffix.len());
                break;
            }
        }
    }
    if w.ends_with('e') && char_len(&w) - 1 >= MIN_STEM_LEN {
        w.pop();
    }
    w
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
