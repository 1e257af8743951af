//! Category assignment.
//!
//! A [`Classifier`] is chosen once, when the categorizer is built: remote when
//! a language model is configured, local keyword matching otherwise. The
//! remote variant carries its own keyword fallback for failed or unmappable
//! replies, so callers never check availability themselves.

mod local;
mod remote;

pub use local::{LocalKeywordClassifier, CATEGORY_KEYWORDS};
pub use remote::{map_label, RemoteClassifier, LABEL_INFERENCE};

use std::sync::Arc;
use tracing::info;

use crate::article::{ArticleRecord, Category};
use crate::llm::TextGenerator;
use crate::TARGET_TRIAGE;

/// Articles sent to the model per batch request.
pub const BATCH_SIZE: usize = 10;

#[derive(Clone)]
pub enum Classifier {
    Remote(RemoteClassifier),
    Local(LocalKeywordClassifier),
}

impl Classifier {
    /// The one place that decides between model and keywords.
    pub fn select(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        match generator {
            Some(generator) => Classifier::Remote(RemoteClassifier::new(generator)),
            None => Classifier::Local(LocalKeywordClassifier),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Classifier::Remote(_))
    }

    pub async fn classify(&self, article: &ArticleRecord) -> Category {
        match self {
            Classifier::Remote(remote) => remote.classify(article).await,
            Classifier::Local(local) => local.classify(article),
        }
    }

    pub async fn classify_batch(&self, articles: &[ArticleRecord]) -> Vec<Category> {
        match self {
            Classifier::Remote(remote) => remote.classify_batch(articles).await,
            Classifier::Local(local) => articles.iter().map(|a| local.classify(a)).collect(),
        }
    }
}

pub struct Categorizer {
    classifier: Classifier,
    batch_size: usize,
}

impl Categorizer {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            batch_size: BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Returns the articles with their category filled in.
    pub async fn categorize_all(&self, articles: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        let mut categories = Vec::with_capacity(articles.len());
        for chunk in articles.chunks(self.batch_size) {
            categories.extend(self.classifier.classify_batch(chunk).await);
        }

        let categorized: Vec<ArticleRecord> = articles
            .into_iter()
            .zip(categories)
            .map(|(mut article, category)| {
                article.category = category;
                article
            })
            .collect();

        info!(
            target: TARGET_TRIAGE,
            "Categorized {} articles ({})",
            categorized.len(),
            if self.classifier.is_remote() { "remote" } else { "keywords" }
        );

        categorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;
    use crate::llm::LlmError;

    fn remote(generator: ScriptedGenerator) -> (Arc<ScriptedGenerator>, Classifier) {
        let generator = Arc::new(generator);
        let classifier = Classifier::select(Some(generator.clone() as Arc<dyn TextGenerator>));
        (generator, classifier)
    }

    #[test]
    fn test_map_label() {
        assert_eq!(map_label("Technology"), Some(Category::Technology));
        assert_eq!(map_label("  the answer is: FINANCE."), Some(Category::Finance));
        assert_eq!(map_label("government/policy"), Some(Category::GovernmentPolicy));
        assert_eq!(map_label("Politics"), Some(Category::GovernmentPolicy));
        assert_eq!(map_label("Tech news"), Some(Category::Technology));
        assert_eq!(map_label("Economics"), Some(Category::Economy));
        assert_eq!(map_label("Miscellaneous"), Some(Category::Miscellaneous));
        assert_eq!(map_label("Finance (not Technology)"), Some(Category::Finance));
        assert_eq!(map_label("2. World, maybe Economy"), Some(Category::World));
        assert_eq!(map_label("banana"), None);
        assert_eq!(map_label(""), None);
    }

    #[tokio::test]
    async fn test_no_generator_selects_local() {
        let classifier = Classifier::select(None);
        assert!(!classifier.is_remote());

        let article = ArticleRecord::new("Senate passes budget", "");
        assert_eq!(classifier.classify(&article).await, Category::GovernmentPolicy);
    }

    #[tokio::test]
    async fn test_remote_label_is_used() {
        let (generator, classifier) = remote(ScriptedGenerator::replying("Space"));
        let article = ArticleRecord::new("Senate passes budget", "");

        assert_eq!(classifier.classify(&article).await, Category::Space);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_keywords() {
        let (_, classifier) = remote(ScriptedGenerator::failing());
        let article = ArticleRecord::new("Vaccine rollout expands", "");
        assert_eq!(classifier.classify(&article).await, Category::Health);

        let (_, classifier) = remote(ScriptedGenerator::replying("I cannot decide"));
        assert_eq!(classifier.classify(&article).await, Category::Health);
    }

    #[tokio::test]
    async fn test_batch_pads_short_reply_with_miscellaneous() {
        let (_, classifier) = remote(ScriptedGenerator::replying("1. Finance\n2. Banana"));
        let articles = vec![
            ArticleRecord::new("Bank shares climb", ""),
            ArticleRecord::new("Vaccine rollout expands", ""),
            ArticleRecord::new("NASA rocket launch", ""),
        ];

        let categories = classifier.classify_batch(&articles).await;
        assert_eq!(
            categories,
            vec![Category::Finance, Category::Health, Category::Miscellaneous]
        );
    }

    #[tokio::test]
    async fn test_batch_unparseable_reply_uses_keywords_for_all() {
        let (_, classifier) = remote(ScriptedGenerator::replying("Sorry, no idea."));
        let articles = vec![
            ArticleRecord::new("Vaccine rollout expands", ""),
            ArticleRecord::new("NASA rocket launch", ""),
        ];

        let categories = classifier.classify_batch(&articles).await;
        assert_eq!(categories, vec![Category::Health, Category::Space]);
    }

    #[tokio::test]
    async fn test_categorize_all_chunks_requests() {
        let (generator, classifier) = remote(ScriptedGenerator::new(vec![
            Ok("1. World\n2. World".to_string()),
            Err(LlmError::EmptyResponse),
        ]));
        let categorizer = Categorizer::new(classifier).with_batch_size(2);
        let articles = vec![
            ArticleRecord::new("a", ""),
            ArticleRecord::new("b", ""),
            ArticleRecord::new("Stock market slides", ""),
        ];

        let categorized = categorizer.categorize_all(articles).await;
        let categories: Vec<Category> = categorized.iter().map(|a| a.category).collect();
        assert_eq!(categories, vec![Category::World, Category::World, Category::Finance]);
        assert_eq!(generator.calls(), 2);
    }
}
