//! Headline similarity measures shared by deduplication and fact-check
//! grouping.
//!
//! Both measures lower-case and trim their inputs first, and both treat an
//! empty input as dissimilar to everything, including another empty input.
//! That keeps articles with blank headlines from collapsing into one group.

use std::collections::HashSet;
use strsim::normalized_levenshtein;

/// Word overlap above which the deduplicator drops a headline.
pub const DUPLICATE_THRESHOLD: f64 = 0.70;

/// Character similarity above which two headlines tell the same story.
pub const SAME_STORY_THRESHOLD: f64 = 0.60;

/// Lower-cased, trimmed form used for all comparisons.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Splits a headline into its set of lower-cased alphanumeric words.
pub fn word_set(text: &str) -> HashSet<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Word-set overlap: `|A ∩ B| / max(|A|, |B|)`.
///
/// Returns 0.0 when either side has no words.
pub fn word_overlap(a: &str, b: &str) -> f64 {
    overlap_of_sets(&word_set(a), &word_set(b))
}

pub(crate) fn overlap_of_sets(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let largest = a.len().max(b.len());
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    a.intersection(b).count() as f64 / largest as f64
}

/// Character-level similarity ratio in `[0, 1]`, based on normalized edit
/// distance over the normalized strings.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    normalized_levenshtein(&a, &b)
}

/// Whether two headlines are near-copies of each other.
pub fn is_duplicate(a: &str, b: &str) -> bool {
    word_overlap(a, b) > DUPLICATE_THRESHOLD
}

/// Whether two headlines cover the same story.
pub fn is_same_story(a: &str, b: &str) -> bool {
    similarity_ratio(a, b) > SAME_STORY_THRESHOLD
}
