//! Additive relevance scoring used to pick which articles get processed.
//!
//! Every signal is independent. Flat signals (trusted source, breaking news,
//! recency, length) fire at most once; keyword signals add their weight once
//! per distinct keyword found, no matter how often it repeats.

use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::article::ArticleRecord;
use crate::util::{word_list_pattern, word_patterns};
use crate::TARGET_TRIAGE;

pub const TRUSTED_SOURCE_WEIGHT: f64 = 10.0;
pub const BREAKING_WEIGHT: f64 = 8.0;
pub const HIGH_IMPACT_WEIGHT: f64 = 6.0;
pub const MARKET_WEIGHT: f64 = 5.0;
pub const TECHNOLOGY_WEIGHT: f64 = 4.0;
pub const HEALTH_WEIGHT: f64 = 4.0;
pub const INTERNATIONAL_WEIGHT: f64 = 3.0;

pub const DEFAULT_TOP_N: usize = 25;

pub const TRUSTED_SOURCES: &[&str] = &[
    "reuters",
    "associated press",
    "ap news",
    "bloomberg",
    "bbc",
    "wall street journal",
    "npr",
    "financial times",
    "cnbc",
    "politico",
];

pub const BREAKING_KEYWORDS: &[&str] = &[
    "breaking",
    "just in",
    "urgent",
    "developing story",
    "live updates",
    "alert",
];

pub const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "white house",
    "congress",
    "senate",
    "supreme court",
    "federal reserve",
    "pentagon",
    "president",
    "prime minister",
    "apple",
    "microsoft",
    "google",
    "amazon",
    "nvidia",
    "tesla",
];

pub const MARKET_KEYWORDS: &[&str] = &[
    "earnings",
    "merger",
    "acquisition",
    "acquisitions",
    "interest rate",
    "interest rates",
    "rate hike",
    "rate hikes",
    "rate cut",
    "rate cuts",
    "stock market",
    "inflation",
    "bankruptcy",
    "layoffs",
];

pub const TECHNOLOGY_KEYWORDS: &[&str] = &[
    "artificial intelligence",
    "machine learning",
    "semiconductor",
    "cybersecurity",
    "quantum",
    "software",
    "robotics",
    "breakthrough",
];

pub const HEALTH_KEYWORDS: &[&str] = &[
    "vaccine",
    "outbreak",
    "pandemic",
    "clinical trial",
    "fda",
    "public health",
    "recall",
    "disease",
];

pub const INTERNATIONAL_KEYWORDS: &[&str] = &[
    "united nations",
    "nato",
    "summit",
    "treaty",
    "sanctions",
    "ceasefire",
    "g7",
    "g20",
];

lazy_static! {
    static ref BREAKING_PATTERN: Regex = word_list_pattern(BREAKING_KEYWORDS);

    /// Keyword signals as (weight, one whole-word pattern per keyword).
    static ref KEYWORD_SIGNALS: Vec<(f64, Vec<Regex>)> = vec![
        (HIGH_IMPACT_WEIGHT, word_patterns(HIGH_IMPACT_KEYWORDS)),
        (MARKET_WEIGHT, word_patterns(MARKET_KEYWORDS)),
        (TECHNOLOGY_WEIGHT, word_patterns(TECHNOLOGY_KEYWORDS)),
        (HEALTH_WEIGHT, word_patterns(HEALTH_KEYWORDS)),
        (INTERNATIONAL_WEIGHT, word_patterns(INTERNATIONAL_KEYWORDS)),
    ];
}

/// Scores articles against a fixed reference time, so the same input always
/// produces the same score.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    trusted_sources: Vec<String>,
    now: DateTime<Utc>,
}

impl PriorityScorer {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            trusted_sources: TRUSTED_SOURCES.iter().map(|s| s.to_string()).collect(),
            now,
        }
    }

    /// Appends publisher names to the built-in trusted list.
    pub fn with_trusted_sources(mut self, extra: &[String]) -> Self {
        self.trusted_sources.extend(
            extra
                .iter()
                .map(|s| normalize_source(s))
                .filter(|s| !s.is_empty()),
        );
        self
    }

    pub fn score(&self, article: &ArticleRecord) -> f64 {
        let text = article.full_text();
        let mut score = 0.0;

        if self.is_trusted(&article.source) {
            score += TRUSTED_SOURCE_WEIGHT;
        }

        // breaking news only counts when the headline or description says so
        let teaser = format!("{} {}", article.headline, article.description);
        if BREAKING_PATTERN.is_match(&teaser) {
            score += BREAKING_WEIGHT;
        }

        for (weight, patterns) in KEYWORD_SIGNALS.iter() {
            score += weight * count_matches(&text, patterns);
        }

        score += self.recency_bonus(&article.published_at);
        score += length_bonus(&article.content);

        score
    }

    fn is_trusted(&self, source: &str) -> bool {
        let source = normalize_source(source);
        !source.is_empty() && self.trusted_sources.iter().any(|t| source.contains(t.as_str()))
    }

    fn recency_bonus(&self, published_at: &str) -> f64 {
        let published = match DateTime::parse_from_rfc3339(published_at.trim()) {
            Ok(published) => published.with_timezone(&Utc),
            Err(_) => return 0.0,
        };

        let age = self.now.signed_duration_since(published);
        if age < Duration::hours(6) {
            2.0
        } else if age < Duration::hours(12) {
            1.0
        } else {
            0.0
        }
    }

    /// Scores every article, then keeps the `top_n` highest. Ties keep their
    /// input order.
    pub fn select_top(&self, articles: Vec<ArticleRecord>, top_n: usize) -> Vec<ArticleRecord> {
        let total = articles.len();
        let mut scored: Vec<ArticleRecord> = articles
            .into_iter()
            .map(|mut article| {
                let score = self.score(&article);
                debug!(target: TARGET_TRIAGE, "Scored '{}' at {:.1}", article.headline, score);
                article.priority_score = Some(score);
                article
            })
            .collect();

        // sort_by is stable, which is what makes tie-breaking deterministic
        scored.sort_by(|a, b| {
            let a = a.priority_score.unwrap_or(0.0);
            let b = b.priority_score.unwrap_or(0.0);
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_n);

        info!(
            target: TARGET_TRIAGE,
            "Selected {} of {} articles by priority", scored.len(), total
        );

        scored
    }
}

fn normalize_source(source: &str) -> String {
    source.trim().to_lowercase().replace('-', " ")
}

fn count_matches(text: &str, patterns: &[Regex]) -> f64 {
    patterns.iter().filter(|p| p.is_match(text)).count() as f64
}

fn length_bonus(content: &str) -> f64 {
    let length = content.chars().count();
    if length > 500 {
        1.0
    } else if length > 200 {
        0.5
    } else {
        0.0
    }
}
