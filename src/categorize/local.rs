use lazy_static::lazy_static;
use regex::Regex;

use crate::article::{ArticleRecord, Category};
use crate::util::word_list_pattern;

lazy_static! {
    /// Keyword lists walked in category declaration order. Keywords match
    /// case-insensitively as whole words, so "bill" does not fire inside
    /// "billion" and plural forms are listed where they matter.
    pub static ref CATEGORY_KEYWORDS: Vec<(Category, Vec<&'static str>)> = vec![
        (
            Category::Technology,
            vec![
                "technology",
                "tech",
                "software",
                "hardware",
                "artificial intelligence",
                "gadget",
                "gadgets",
                "smartphone",
                "smartphones",
                "cybersecurity",
            ],
        ),
        (
            Category::Health,
            vec![
                "health",
                "healthcare",
                "medicine",
                "medical",
                "covid",
                "disease",
                "diseases",
                "vaccine",
                "vaccines",
                "wellness",
                "hospital",
                "hospitals",
            ],
        ),
        (
            Category::GovernmentPolicy,
            vec![
                "government",
                "policy",
                "policies",
                "congress",
                "congressional",
                "senate",
                "senator",
                "senators",
                "white house",
                "house of representatives",
                "house passes",
                "house passed",
                "passed the house",
                "lawmakers",
                "legislation",
                "legislative",
                "regulation",
                "regulations",
                "bill",
                "bills",
                "law",
                "laws",
            ],
        ),
        (
            Category::Economy,
            vec![
                "economy",
                "economic",
                "gdp",
                "inflation",
                "jobs report",
                "employment",
                "unemployment",
            ],
        ),
        (
            Category::Finance,
            vec![
                "finance",
                "financial",
                "stock",
                "stocks",
                "market",
                "markets",
                "earnings",
                "analyst",
                "analysts",
                "m&a",
                "securities",
                "ipo",
                "merger",
                "mergers",
            ],
        ),
        (
            Category::World,
            vec!["world", "global", "international", "foreign", "united nations"],
        ),
        (
            Category::Space,
            vec![
                "nasa",
                "spacex",
                "rocket",
                "rockets",
                "satellite",
                "satellites",
                "astronaut",
                "astronauts",
                "orbit",
                "space station",
                "telescope",
                "lunar",
            ],
        ),
    ];

    static ref CATEGORY_PATTERNS: Vec<(Category, Regex)> = CATEGORY_KEYWORDS
        .iter()
        .map(|(category, keywords)| (*category, word_list_pattern(keywords)))
        .collect();
}

/// Deterministic keyword classifier: the first category with any keyword in
/// the text wins, Miscellaneous when none match.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalKeywordClassifier;

impl LocalKeywordClassifier {
    pub fn classify_text(&self, text: &str) -> Category {
        CATEGORY_PATTERNS
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Miscellaneous)
    }

    pub fn classify(&self, article: &ArticleRecord) -> Category {
        self.classify_text(&article.full_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_but_misc_has_keywords() {
        let listed: Vec<Category> = CATEGORY_KEYWORDS.iter().map(|(c, _)| *c).collect();
        assert_eq!(listed, Category::ALL[..7].to_vec());
        for (_, keywords) in CATEGORY_KEYWORDS.iter() {
            assert!(keywords.iter().all(|k| *k == k.to_lowercase()));
        }
    }

    #[test]
    fn test_first_match_wins_over_best_match() {
        let classifier = LocalKeywordClassifier;
        // One Technology keyword beats three Finance keywords.
        let text = "Software maker's stock jumps on earnings, analyst says";
        assert_eq!(classifier.classify_text(text), Category::Technology);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let classifier = LocalKeywordClassifier;
        assert_eq!(classifier.classify_text("NASA ROCKET LAUNCH"), Category::Space);
        assert_eq!(classifier.classify_text("The Senate Votes"), Category::GovernmentPolicy);
        assert_eq!(classifier.classify_text("GDP grew 2%"), Category::Economy);
    }

    #[test]
    fn test_plain_legislative_headline_is_policy() {
        let classifier = LocalKeywordClassifier;
        assert_eq!(
            classifier.classify_text("House passes H.R. 5 infrastructure bill"),
            Category::GovernmentPolicy
        );
        assert_eq!(classifier.classify_text("New tax law takes effect"), Category::GovernmentPolicy);
    }

    #[test]
    fn test_keywords_do_not_fire_inside_longer_words() {
        let classifier = LocalKeywordClassifier;
        assert_eq!(
            classifier.classify_text("Billionaire buys household brand"),
            Category::Miscellaneous
        );
        assert_eq!(classifier.classify_text("Stocks slide"), Category::Finance);
    }

    #[test]
    fn test_total_and_defaults_to_miscellaneous() {
        let classifier = LocalKeywordClassifier;
        assert_eq!(classifier.classify_text(""), Category::Miscellaneous);
        assert_eq!(classifier.classify_text("Local bakery wins award"), Category::Miscellaneous);
        assert_eq!(
            classifier.classify(&ArticleRecord::new("Vaccine trial begins", "")),
            Category::Health
        );
    }
}
