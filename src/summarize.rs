use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::article::ArticleRecord;
use crate::llm::{LlmError, TextGenerator};
use crate::prompt;
use crate::util::{parse_numbered_list, sentences, truncate_with_ellipsis};
use crate::{TARGET_LLM_REQUEST, TARGET_TRIAGE};

/// Articles per batch summary request.
pub const SUMMARY_BATCH_SIZE: usize = 10;

/// Texts shorter than this are not worth a model call.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 40;

pub const MAX_LOCAL_SUMMARY_CHARS: usize = 300;

/// Extractive fallback: the first two sentences of the content, or the
/// headline when there is no content.
pub fn local_summary(article: &ArticleRecord) -> Option<String> {
    let lead: Vec<&str> = sentences(&article.content).take(2).collect();
    let summary = if lead.is_empty() {
        article.headline.trim().to_string()
    } else {
        format!("{}.", lead.join(". "))
    };

    if summary.is_empty() {
        None
    } else if summary.chars().count() > MAX_LOCAL_SUMMARY_CHARS {
        Some(truncate_with_ellipsis(&summary, MAX_LOCAL_SUMMARY_CHARS))
    } else {
        Some(summary)
    }
}

pub struct Summarizer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Summarizer {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Returns the articles with `summary` filled in where one could be made.
    pub async fn summarize_all(&self, articles: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        let summaries = match &self.generator {
            Some(generator) => {
                let mut summaries = Vec::with_capacity(articles.len());
                for chunk in articles.chunks(SUMMARY_BATCH_SIZE) {
                    summaries.extend(self.summarize_chunk(generator.as_ref(), chunk).await);
                }
                summaries
            }
            None => articles.iter().map(local_summary).collect(),
        };

        let summarized: Vec<ArticleRecord> = articles
            .into_iter()
            .zip(summaries)
            .map(|(mut article, summary)| {
                article.summary = summary;
                article
            })
            .collect();

        info!(
            target: TARGET_TRIAGE,
            "Summarized {} of {} articles",
            summarized.iter().filter(|a| a.summary.is_some()).count(),
            summarized.len()
        );

        summarized
    }

    async fn summarize_chunk(
        &self,
        generator: &dyn TextGenerator,
        articles: &[ArticleRecord],
    ) -> Vec<Option<String>> {
        match self.summarize_batch(generator, articles).await {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!(target: TARGET_LLM_REQUEST, "[{}]: batch summary failed ({}), summarizing one by one", generator.name(), e);
                let mut summaries = Vec::with_capacity(articles.len());
                for article in articles {
                    summaries.push(self.summarize_one(generator, article).await);
                }
                summaries
            }
        }
    }

    async fn summarize_batch(
        &self,
        generator: &dyn TextGenerator,
        articles: &[ArticleRecord],
    ) -> Result<Vec<Option<String>>, LlmError> {
        let response = generator
            .generate(&prompt::batch_summary_prompt(articles))
            .await?;

        let items = parse_numbered_list(&response);
        if items.is_empty() {
            return Err(LlmError::Request("no numbered summaries in reply".to_string()));
        }

        let mut summaries: Vec<Option<String>> = items.into_iter().map(Some).collect();
        summaries.resize(articles.len(), None);
        Ok(summaries)
    }

    async fn summarize_one(
        &self,
        generator: &dyn TextGenerator,
        article: &ArticleRecord,
    ) -> Option<String> {
        let text = if article.content.trim().is_empty() {
            &article.headline
        } else {
            &article.content
        };

        if text.trim().chars().count() < MIN_SUMMARY_INPUT_CHARS {
            debug!(target: TARGET_LLM_REQUEST, "Text too short to summarize remotely: '{}'", article.headline);
            return local_summary(article);
        }

        match generator.generate(&prompt::summary_prompt(text)).await {
            Ok(summary) => Some(summary.trim().to_string()),
            Err(e) => {
                debug!(target: TARGET_LLM_REQUEST, "[{}]: summary failed ({}), using lead sentences", generator.name(), e);
                local_summary(article)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;

    const LONG_CONTENT: &str =
        "The central bank raised its key rate by a quarter point. Officials cited inflation. Markets were calm.";

    #[test]
    fn test_local_summary() {
        let article = ArticleRecord::new("Rates rise", LONG_CONTENT);
        assert_eq!(
            local_summary(&article).unwrap(),
            "The central bank raised its key rate by a quarter point. Officials cited inflation."
        );

        assert_eq!(
            local_summary(&ArticleRecord::new("Headline only", "")).unwrap(),
            "Headline only"
        );
        assert!(local_summary(&ArticleRecord::default()).is_none());

        let long = ArticleRecord::new("", &"a".repeat(500));
        assert!(local_summary(&long).unwrap().ends_with("..."));
    }

    #[tokio::test]
    async fn test_without_generator_uses_local_summaries() {
        let summarizer = Summarizer::new(None);
        let articles = vec![ArticleRecord::new("Rates rise", LONG_CONTENT)];
        let summarized = summarizer.summarize_all(articles).await;
        assert!(summarized[0].summary.as_deref().unwrap().starts_with("The central bank"));
    }

    #[tokio::test]
    async fn test_batch_reply_is_parsed_and_padded() {
        let generator = Arc::new(ScriptedGenerator::replying(
            "1. Rates went up. Markets held.\n",
        ));
        let summarizer = Summarizer::new(Some(generator.clone() as Arc<dyn TextGenerator>));
        let articles = vec![
            ArticleRecord::new("Rates rise", LONG_CONTENT),
            ArticleRecord::new("Second story", LONG_CONTENT),
        ];

        let summarized = summarizer.summarize_all(articles).await;
        assert_eq!(summarized[0].summary.as_deref(), Some("Rates went up. Markets held."));
        assert_eq!(summarized[1].summary, None);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_batch_falls_back_to_individual_calls() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Err(LlmError::Timeout { secs: 30 }),
            Ok(" A neutral summary. ".to_string()),
        ]));
        let summarizer = Summarizer::new(Some(generator.clone() as Arc<dyn TextGenerator>));
        let articles = vec![
            ArticleRecord::new("Rates rise", LONG_CONTENT),
            ArticleRecord::new("Short", "Too short."),
        ];

        let summarized = summarizer.summarize_all(articles).await;
        assert_eq!(summarized[0].summary.as_deref(), Some("A neutral summary."));
        assert_eq!(summarized[1].summary.as_deref(), Some("Too short."));
        // batch + one individual call; the short article never reaches the model
        assert_eq!(generator.calls(), 2);
    }
}
