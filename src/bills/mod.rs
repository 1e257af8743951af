//! Detects legislative bills in articles and maps them to affected sectors
//! and companies.

mod tables;

pub use tables::{COMPANIES_BY_SECTOR, SECTOR_KEYWORDS};

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::article::{ArticleRecord, BillImpact, Branch, Category};
use crate::util::{sentences, truncate_with_ellipsis, word_list_pattern};
use crate::TARGET_BILLS;
use tables::*;

pub const MAX_COMPANIES: usize = 10;
pub const MAX_EXPLANATION_CHARS: usize = 200;

lazy_static! {
    static ref GATE_PATTERN: Regex = word_list_pattern(BILL_KEYWORDS);

    /// Tried in order; the first pattern with any match supplies the number.
    static ref NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\b([A-Z]\.R\.\s+\d+)").unwrap(),
        Regex::new(r"(?i)\b([A-Z]\.\s+\d+)").unwrap(),
        Regex::new(r"(?i)\b([A-Z][A-Z]\d+)").unwrap(),
        // "House 1234": only chamber and measure words, so "in 2024" is not a bill
        Regex::new(r"\b((?:House|Senate|Bill|Resolution|Amendment)\.?\s+\d+)").unwrap(),
    ];

    static ref QUOTED_NAME: Regex = Regex::new(r#"["“]([^"“”]+)["”]"#).unwrap();

    static ref PHRASE_NAME_PATTERNS: Vec<Regex> = ["Act", "Bill", "Law"]
        .iter()
        .map(|suffix| Regex::new(&format!(r"\b((?:[A-Z][A-Za-z]*\s+)+{})\b", suffix)).unwrap())
        .collect();

    static ref SECTOR_PATTERNS: Vec<(&'static str, Regex)> = SECTOR_KEYWORDS
        .iter()
        .map(|(sector, keywords)| (*sector, word_list_pattern(keywords)))
        .collect();
}

/// True when the text mentions anything legislative.
pub fn mentions_legislation(text: &str) -> bool {
    GATE_PATTERN.is_match(text)
}

pub fn extract_bill_number(text: &str) -> Option<String> {
    NUMBER_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|caps| caps[1].to_string())
}

pub fn extract_bill_name(text: &str) -> Option<String> {
    if let Some(caps) = QUOTED_NAME.captures(text) {
        let name = caps[1].trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    PHRASE_NAME_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|caps| {
            let name = caps[1].trim();
            name.strip_prefix("The ").unwrap_or(name).to_string()
        })
}

/// The first chamber whose phrases appear, checked house, senate, then both.
pub fn detect_branch(text: &str) -> Branch {
    let text = text.to_lowercase();
    let checks = [
        (Branch::House, HOUSE_KEYWORDS),
        (Branch::Senate, SENATE_KEYWORDS),
        (Branch::Both, BOTH_CHAMBERS_KEYWORDS),
    ];

    checks
        .into_iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(branch, _)| branch)
        .unwrap_or(Branch::Unknown)
}

pub fn explain(text: &str) -> String {
    sentences(text)
        .find(|sentence| {
            let sentence = sentence.to_lowercase();
            ACTION_KEYWORDS.iter().any(|k| sentence.contains(k))
        })
        .map(|sentence| {
            if sentence.chars().count() > MAX_EXPLANATION_CHARS {
                truncate_with_ellipsis(sentence, MAX_EXPLANATION_CHARS)
            } else {
                sentence.to_string()
            }
        })
        .unwrap_or_else(|| GENERIC_EXPLANATION.to_string())
}

/// Every sector with at least one keyword hit, in declaration order.
pub fn affected_sectors(text: &str) -> Vec<&'static str> {
    SECTOR_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(sector, _)| *sector)
        .collect()
}

/// Walks the sectors' company tables round-robin so each sector is
/// represented before the cap is reached.
pub fn affected_companies(sectors: &[&str]) -> Vec<String> {
    let tables: Vec<&[&str]> = sectors.iter().filter_map(|s| tables::companies_for(s)).collect();
    let longest = tables.iter().map(|t| t.len()).max().unwrap_or(0);
    let mut companies: Vec<String> = Vec::new();

    for rank in 0..longest {
        for ticker in tables.iter().filter_map(|t| t.get(rank)) {
            if companies.len() == MAX_COMPANIES {
                return companies;
            }
            if !companies.iter().any(|c| c == ticker) {
                companies.push(ticker.to_string());
            }
        }
    }

    companies
}

/// Looks for a bill in one article's text.
///
/// Returns `None` when the text has no legislative keyword or when neither a
/// bill number nor a bill name can be found.
pub fn extract_bill(source_article_id: usize, headline: &str, text: &str) -> Option<BillImpact> {
    if text.trim().is_empty() || !mentions_legislation(text) {
        return None;
    }

    let bill_number = extract_bill_number(text);
    let bill_name = extract_bill_name(text);
    if bill_number.is_none() && bill_name.is_none() {
        return None;
    }

    let sectors = affected_sectors(text);
    let companies = affected_companies(&sectors);

    BillImpact::new(
        source_article_id,
        headline,
        bill_name,
        bill_number,
        detect_branch(text),
        explain(text),
        sectors.into_iter().map(String::from).collect::<BTreeSet<_>>(),
        companies,
    )
}

/// Runs bill extraction over a batch.
///
/// Unless `all_categories` is set only Government/Policy articles are
/// examined. Each article that yields a bill gets `bill_impact` set to the
/// bill's index in the returned list.
pub fn analyze_bills(
    articles: Vec<ArticleRecord>,
    all_categories: bool,
) -> (Vec<ArticleRecord>, Vec<BillImpact>) {
    let mut impacts = Vec::new();

    let articles: Vec<ArticleRecord> = articles
        .into_iter()
        .enumerate()
        .map(|(index, mut article)| {
            if !all_categories && article.category != Category::GovernmentPolicy {
                return article;
            }

            if let Some(impact) = extract_bill(index, &article.headline, &article.text()) {
                info!(
                    target: TARGET_BILLS,
                    "Bill found: {} (branch: {}, sectors: {:?})",
                    impact.display_name(),
                    impact.branch_passed(),
                    impact.sectors_affected()
                );
                article.bill_impact = Some(impacts.len());
                impacts.push(impact);
            } else {
                debug!(target: TARGET_BILLS, "No bill in '{}'", article.headline);
            }
            article
        })
        .collect();

    info!(target: TARGET_BILLS, "Bill analysis complete: {} bills found", impacts.len());
    (articles, impacts)
}
