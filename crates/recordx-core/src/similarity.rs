//! Approximate name matching for the fallback search
//!
//! The combined score weighs three measures of two strings `a` and `b`:
//!
//! - edit distance: `1 - levenshtein(a, b) / max(len)` (weight 0.6)
//! - character overlap: Jaccard index of the distinct characters (weight 0.3)
//! - length ratio: `min(len) / max(len)` (weight 0.1)
//!
//! Lengths are counted in `char`s. The result lies in `[0, 1]`; an empty input
//! on either side scores `0.0`.

use std::collections::HashSet;

/// Score at or above which a name token counts as a match
pub const DEFAULT_THRESHOLD: f64 = 0.6;

// Weights in tenths so identical strings score exactly 1.0
const EDIT_WEIGHT: f64 = 6.0;
const OVERLAP_WEIGHT: f64 = 3.0;
const LENGTH_WEIGHT: f64 = 1.0;

/// Combined similarity of two strings, case-sensitive as given
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let longest = a.len().max(b.len()) as f64;
    let shortest = a.len().min(b.len()) as f64;

    let edit = 1.0 - levenshtein(&a, &b) as f64 / longest;
    let overlap = char_overlap(&a, &b);
    let length = shortest / longest;

    (EDIT_WEIGHT * edit + OVERLAP_WEIGHT * overlap + LENGTH_WEIGHT * length) / 10.0
}

/// Unit-cost edit distance (insert, delete, substitute)
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitution = usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + substitution);
        }
    }
    dp[a.len()][b.len()]
}

fn char_overlap(a: &[char], b: &[char]) -> f64 {
    let a: HashSet<char> = a.iter().copied().collect();
    let b: HashSet<char> = b.iter().copied().collect();
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// Whether any whitespace-delimited token of `name` is similar to any keyword
///
/// Both sides are lower-cased before scoring.
pub fn name_matches<S: AsRef<str>>(name: &str, keywords: &[S], threshold: f64) -> bool {
    let tokens: Vec<String> = name.split_whitespace().map(str::to_lowercase).collect();
    keywords.iter().any(|keyword| {
        let keyword = keyword.as_ref().to_lowercase();
        tokens
            .iter()
            .any(|token| calculate_similarity(&keyword, token) >= threshold)
    })
}
