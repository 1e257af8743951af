//! Runs every triage stage over one batch, in order, and assembles the digest.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::article::{ArticleRecord, BillImpact, Category, FactCheckStatus, RawArticle};
use crate::bills::analyze_bills;
use crate::categorize::{Categorizer, Classifier};
use crate::dedup::deduplicate;
use crate::environment::TriageConfig;
use crate::fact_check::fact_check_articles;
use crate::llm::TextGenerator;
use crate::priority::PriorityScorer;
use crate::summarize::Summarizer;
use crate::TARGET_TRIAGE;

/// Accepted input shapes: a bare array or a NewsAPI-style response.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleFeed {
    List(Vec<RawArticle>),
    Response { articles: Vec<RawArticle> },
}

pub fn parse_articles(json: &str) -> Result<Vec<RawArticle>> {
    let feed: ArticleFeed =
        serde_json::from_str(json).context("Input is neither an article array nor an object with an 'articles' array")?;
    Ok(match feed {
        ArticleFeed::List(articles) => articles,
        ArticleFeed::Response { articles } => articles,
    })
}

pub fn load_articles(path: &Path) -> Result<Vec<RawArticle>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read articles from {}", path.display()))?;
    parse_articles(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestStats {
    pub total: usize,
    pub verified: usize,
    pub unverified: usize,
    /// Every category in declaration order, including empty ones.
    pub by_category: Vec<CategoryCount>,
    pub top_category: Option<Category>,
    pub bills: usize,
}

impl DigestStats {
    pub fn compute(articles: &[ArticleRecord], bill_impacts: &[BillImpact]) -> Self {
        let unverified = articles
            .iter()
            .filter(|a| a.fact_check_status == FactCheckStatus::Unverified)
            .count();

        let by_category: Vec<CategoryCount> = Category::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: articles.iter().filter(|a| a.category == category).count(),
            })
            .collect();

        // strict comparison keeps the earliest category on ties
        let top_category = by_category
            .iter()
            .filter(|c| c.count > 0)
            .fold(None::<&CategoryCount>, |best, c| match best {
                Some(b) if b.count >= c.count => Some(b),
                _ => Some(c),
            })
            .map(|c| c.category);

        Self {
            total: articles.len(),
            verified: articles.len() - unverified,
            unverified,
            by_category,
            top_category,
            bills: bill_impacts.len(),
        }
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        let mut add = |label: &str, value: String| {
            table.add_row(Row::new(vec![Cell::new(label), Cell::new(&value)]));
        };
        add("Articles", self.total.to_string());
        add("Verified", self.verified.to_string());
        add("Unverified", self.unverified.to_string());
        for entry in self.by_category.iter().filter(|c| c.count > 0) {
            add(entry.category.as_str(), entry.count.to_string());
        }
        add(
            "Top category",
            self.top_category
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
        add("Bills", self.bills.to_string());

        table
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub generated_at: String,
    pub articles: Vec<ArticleRecord>,
    pub bill_impacts: Vec<BillImpact>,
    pub stats: DigestStats,
}

pub struct Pipeline {
    config: TriageConfig,
    scorer: PriorityScorer,
    categorizer: Categorizer,
    summarizer: Summarizer,
    now: DateTime<Utc>,
}

impl Pipeline {
    /// `generator` is the optional language model; `None` runs every stage on
    /// local heuristics. `now` is the reference time for recency scoring.
    pub fn new(
        config: TriageConfig,
        generator: Option<Arc<dyn TextGenerator>>,
        now: DateTime<Utc>,
    ) -> Self {
        let scorer = PriorityScorer::new(now).with_trusted_sources(&config.extra_trusted_sources);

        Self {
            scorer,
            categorizer: Categorizer::new(Classifier::select(generator.clone())),
            summarizer: Summarizer::new(generator),
            config,
            now,
        }
    }

    pub async fn run(&self, raw: Vec<RawArticle>) -> Digest {
        let received = raw.len();
        let articles: Vec<ArticleRecord> = raw
            .into_iter()
            .map(ArticleRecord::from)
            .filter(|article| {
                if article.is_empty() {
                    debug!(target: TARGET_TRIAGE, "Dropping article with no headline or content");
                }
                !article.is_empty()
            })
            .collect();
        info!(
            target: TARGET_TRIAGE,
            "Received {} articles, {} with text", received, articles.len()
        );

        self.process(articles).await
    }

    /// Runs the stages over records that already have text.
    pub async fn process(&self, articles: Vec<ArticleRecord>) -> Digest {
        let articles = deduplicate(articles);
        let articles = self.scorer.select_top(articles, self.config.top_n);
        let articles = self.categorizer.categorize_all(articles).await;
        let articles = self.summarizer.summarize_all(articles).await;
        let articles = fact_check_articles(articles);
        let (articles, bill_impacts) = analyze_bills(articles, self.config.bills_all_categories);

        let stats = DigestStats::compute(&articles, &bill_impacts);
        info!(
            target: TARGET_TRIAGE,
            "Digest ready: {} articles, {} unverified, {} bills",
            stats.total,
            stats.unverified,
            stats.bills
        );

        Digest {
            generated_at: self.now.to_rfc3339(),
            articles,
            bill_impacts,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    const FEED: &str = r#"{
        "status": "ok",
        "articles": [
            {"title": "Fed raises interest rates by 0.25%", "description": "The Federal Reserve raised rates.", "source": {"name": "Reuters"}, "url": "https://example.com/1", "publishedAt": "2025-03-10T10:00:00Z"},
            {"title": "Federal Reserve raises interest rates 0.25%", "content": "Markets reacted calmly.", "source": {"name": "Blog"}, "url": "https://example.com/2"},
            {"title": "Senate passes energy bill", "content": "H.R. 1234, the \"Clean Energy Act,\" was passed by the Senate. It allocates funding for solar and EV infrastructure.", "source": "AP News"},
            {"title": "", "content": ""},
            {"title": "NASA rocket reaches orbit", "content": "The launch went as planned."}
        ]
    }"#;

    #[test]
    fn test_parse_articles_accepts_both_shapes() {
        assert_eq!(parse_articles(FEED).unwrap().len(), 5);
        let bare = r#"[{"headline": "One"}, {"title": "Two", "source": "BBC"}]"#;
        assert_eq!(parse_articles(bare).unwrap().len(), 2);
        assert!(parse_articles(r#"{"items": []}"#).is_err());
    }

    #[tokio::test]
    async fn test_local_run_end_to_end() {
        let pipeline = Pipeline::new(TriageConfig::default(), None, now());
        let digest = pipeline.run(parse_articles(FEED).unwrap()).await;

        let headlines: Vec<&str> = digest.articles.iter().map(|a| a.headline.as_str()).collect();
        assert_eq!(digest.articles.len(), 3);
        assert!(headlines.contains(&"Fed raises interest rates by 0.25%"));
        assert!(!headlines.contains(&"Federal Reserve raises interest rates 0.25%"));

        let bill_article = digest
            .articles
            .iter()
            .find(|a| a.headline == "Senate passes energy bill")
            .unwrap();
        assert_eq!(bill_article.category, Category::GovernmentPolicy);
        assert_eq!(bill_article.bill_impact, Some(0));
        assert_eq!(digest.bill_impacts[0].bill_number(), Some("H.R. 1234"));

        let space = digest.articles.iter().find(|a| a.headline.starts_with("NASA")).unwrap();
        assert_eq!(space.category, Category::Space);

        assert!(digest.articles.iter().all(|a| a.priority_score.is_some()));
        assert!(digest.articles.iter().all(|a| a.summary.is_some()));
        assert_eq!(digest.stats.total, 3);
        assert_eq!(digest.stats.bills, 1);
        assert_eq!(digest.generated_at, "2025-03-10T12:00:00+00:00");
    }

    #[tokio::test]
    async fn test_house_bill_headline_yields_bill_impact() {
        let feed = r#"[{"title": "House passes H.R. 5 infrastructure bill", "content": "The bill funds roads and bridges."}]"#;
        let pipeline = Pipeline::new(TriageConfig::default(), None, now());
        let digest = pipeline.run(parse_articles(feed).unwrap()).await;

        assert_eq!(digest.articles[0].category, Category::GovernmentPolicy);
        assert_eq!(digest.articles[0].bill_impact, Some(0));
        assert_eq!(digest.stats.bills, 1);
        assert_eq!(digest.bill_impacts[0].bill_number(), Some("H.R. 5"));
    }

    #[tokio::test]
    async fn test_top_n_limits_output() {
        let config = TriageConfig {
            top_n: 1,
            ..TriageConfig::default()
        };
        let pipeline = Pipeline::new(config, None, now());
        let digest = pipeline.run(parse_articles(FEED).unwrap()).await;

        assert_eq!(digest.articles.len(), 1);
        // trusted source, recent, high impact and market keywords
        assert_eq!(digest.articles[0].headline, "Fed raises interest rates by 0.25%");
    }

    #[tokio::test]
    async fn test_failing_model_still_produces_digest() {
        let generator: Arc<dyn TextGenerator> = Arc::new(ScriptedGenerator::failing());
        let pipeline = Pipeline::new(TriageConfig::default(), Some(generator), now());
        let digest = pipeline.run(parse_articles(FEED).unwrap()).await;

        assert_eq!(digest.articles.len(), 3);
        let space = digest.articles.iter().find(|a| a.headline.starts_with("NASA")).unwrap();
        assert_eq!(space.category, Category::Space);
        assert_eq!(digest.stats.bills, 1);
    }

    #[test]
    fn test_stats() {
        let mut tech = ArticleRecord::new("a", "");
        tech.category = Category::Technology;
        let mut space = ArticleRecord::new("b", "");
        space.category = Category::Space;
        space.fact_check_status = FactCheckStatus::Unverified;

        let stats = DigestStats::compute(&[tech, space], &[]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.verified, 1);
        assert_eq!(stats.unverified, 1);
        assert_eq!(stats.by_category.len(), Category::ALL.len());
        // tie between Technology and Space goes to the earlier category
        assert_eq!(stats.top_category, Some(Category::Technology));
        assert_eq!(stats.to_table().len(), 8);

        assert_eq!(DigestStats::compute(&[], &[]).top_category, None);
    }
}
