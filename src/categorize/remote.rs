use std::sync::Arc;
use tracing::{debug, warn};

use super::local::LocalKeywordClassifier;
use crate::article::{ArticleRecord, Category};
use crate::llm::TextGenerator;
use crate::prompt;
use crate::util::parse_numbered_list;
use crate::TARGET_LLM_REQUEST;

/// Secondary table for free-text replies that do not spell out a category
/// name. Checked in order, first hit wins.
pub const LABEL_INFERENCE: &[(&str, Category)] = &[
    ("tech", Category::Technology),
    ("software", Category::Technology),
    ("computing", Category::Technology),
    ("medic", Category::Health),
    ("health", Category::Health),
    ("politic", Category::GovernmentPolicy),
    ("government", Category::GovernmentPolicy),
    ("policy", Category::GovernmentPolicy),
    ("legislat", Category::GovernmentPolicy),
    ("econom", Category::Economy),
    ("financ", Category::Finance),
    ("market", Category::Finance),
    ("business", Category::Finance),
    ("international", Category::World),
    ("global", Category::World),
    ("astronom", Category::Space),
    ("nasa", Category::Space),
    ("other", Category::Miscellaneous),
    ("general", Category::Miscellaneous),
];

/// Maps a free-text model reply onto a category: the category name that
/// appears earliest in the reply, else the inference table.
pub fn map_label(response: &str) -> Option<Category> {
    let response = response.trim().to_lowercase();
    if response.is_empty() {
        return None;
    }

    Category::ALL
        .iter()
        .filter_map(|category| {
            response
                .find(&category.as_str().to_lowercase())
                .map(|position| (position, *category))
        })
        .min_by_key(|(position, _)| *position)
        .map(|(_, category)| category)
        .or_else(|| {
            LABEL_INFERENCE
                .iter()
                .find(|(needle, _)| response.contains(needle))
                .map(|(_, category)| *category)
        })
}

/// Asks a language model for the category and answers locally whenever the
/// model fails or says something unmappable.
#[derive(Clone)]
pub struct RemoteClassifier {
    generator: Arc<dyn TextGenerator>,
    fallback: LocalKeywordClassifier,
}

impl RemoteClassifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            fallback: LocalKeywordClassifier,
        }
    }

    pub async fn classify(&self, article: &ArticleRecord) -> Category {
        let prompt = prompt::categorization_prompt(&article.full_text());

        match self.generator.generate(&prompt).await {
            Ok(response) => match map_label(&response) {
                Some(category) => category,
                None => {
                    warn!(target: TARGET_LLM_REQUEST, "[{}]: unmappable category '{}', using keywords", self.generator.name(), response.trim());
                    self.fallback.classify(article)
                }
            },
            Err(e) => {
                warn!(target: TARGET_LLM_REQUEST, "[{}]: categorization failed ({}), using keywords", self.generator.name(), e);
                self.fallback.classify(article)
            }
        }
    }

    /// Categorizes several articles with one request.
    ///
    /// Missing trailing entries become Miscellaneous; a reply with no list at
    /// all sends the whole batch to the keyword classifier.
    pub async fn classify_batch(&self, articles: &[ArticleRecord]) -> Vec<Category> {
        if articles.is_empty() {
            return Vec::new();
        }

        let prompt = prompt::batch_categorization_prompt(articles);
        let labels = match self.generator.generate(&prompt).await {
            Ok(response) => parse_numbered_list(&response),
            Err(e) => {
                warn!(target: TARGET_LLM_REQUEST, "[{}]: batch categorization failed ({}), using keywords", self.generator.name(), e);
                return self.fallback_batch(articles);
            }
        };

        if labels.is_empty() {
            warn!(target: TARGET_LLM_REQUEST, "[{}]: could not parse batch categories, using keywords", self.generator.name());
            return self.fallback_batch(articles);
        }

        if labels.len() < articles.len() {
            debug!(
                target: TARGET_LLM_REQUEST,
                "[{}]: got {} categories for {} articles, padding with Miscellaneous",
                self.generator.name(),
                labels.len(),
                articles.len()
            );
        }

        articles
            .iter()
            .enumerate()
            .map(|(i, article)| match labels.get(i) {
                Some(label) => map_label(label).unwrap_or_else(|| self.fallback.classify(article)),
                None => Category::Miscellaneous,
            })
            .collect()
    }

    fn fallback_batch(&self, articles: &[ArticleRecord]) -> Vec<Category> {
        articles.iter().map(|a| self.fallback.classify(a)).collect()
    }
}
