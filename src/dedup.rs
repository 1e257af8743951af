use std::collections::HashSet;
use tracing::{debug, info};

use crate::article::ArticleRecord;
use crate::similarity::{normalize, overlap_of_sets, word_set, DUPLICATE_THRESHOLD};
use crate::TARGET_TRIAGE;

/// Why an incoming article was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuplicateReason {
    SameHeadline,
    SameUrl,
    SimilarHeadline { kept_index: usize, overlap: f64 },
}

/// Removes exact and near-duplicate articles, keeping the first occurrence
/// and preserving input order.
pub fn deduplicate(articles: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    let total = articles.len();
    let mut kept: Vec<ArticleRecord> = Vec::with_capacity(total);
    let mut seen_headlines: HashSet<String> = HashSet::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut kept_words: Vec<HashSet<String>> = Vec::new();

    for article in articles {
        let headline = normalize(&article.headline);
        let words = word_set(&article.headline);

        match find_duplicate(&article, &headline, &words, &seen_headlines, &seen_urls, &kept_words) {
            Some(reason) => {
                debug!(
                    target: TARGET_TRIAGE,
                    "Dropping duplicate article '{}' ({:?})", article.headline, reason
                );
            }
            None => {
                if !headline.is_empty() {
                    seen_headlines.insert(headline);
                }
                if !article.url.trim().is_empty() {
                    seen_urls.insert(article.url.trim().to_string());
                }
                kept_words.push(words);
                kept.push(article);
            }
        }
    }

    info!(
        target: TARGET_TRIAGE,
        "Deduplication kept {} of {} articles ({} removed)",
        kept.len(),
        total,
        total - kept.len()
    );

    kept
}

fn find_duplicate(
    article: &ArticleRecord,
    headline: &str,
    words: &HashSet<String>,
    seen_headlines: &HashSet<String>,
    seen_urls: &HashSet<String>,
    kept_words: &[HashSet<String>],
) -> Option<DuplicateReason> {
    if !headline.is_empty() && seen_headlines.contains(headline) {
        return Some(DuplicateReason::SameHeadline);
    }

    let url = article.url.trim();
    if !url.is_empty() && seen_urls.contains(url) {
        return Some(DuplicateReason::SameUrl);
    }

    kept_words.iter().enumerate().find_map(|(kept_index, kept)| {
        let overlap = overlap_of_sets(words, kept);
        (overlap > DUPLICATE_THRESHOLD).then_some(DuplicateReason::SimilarHeadline {
            kept_index,
            overlap,
        })
    })
}
