use crate::article::ArticleRecord;
use crate::prompt::common::{
    bounded, current_date, DONT_TELL_ME, MAX_ARTICLE_CHARS, MAX_BATCH_ARTICLE_CHARS, NEUTRAL_TONE,
};

/// Generate a prompt for a neutral two to three sentence summary
pub fn summary_prompt(article_text: &str) -> String {
    format!(
        r#"Today's date: {date}

## ARTICLE (FOR SUMMARY):
----------
{article}
----------

Summarize this news article in 2-3 sentences.
{neutral}
{dont_tell_me}"#,
        date = current_date(),
        article = bounded(article_text, MAX_ARTICLE_CHARS),
        neutral = NEUTRAL_TONE,
        dont_tell_me = DONT_TELL_ME
    )
}

/// Generate one prompt that summarizes every article as a numbered list
pub fn batch_summary_prompt(articles: &[ArticleRecord]) -> String {
    let listing: String = articles
        .iter()
        .map(|article| {
            format!(
                "Headline: {}\nContent: {}\nSource: {}\n\n",
                article.headline,
                bounded(&article.content, MAX_BATCH_ARTICLE_CHARS),
                article.source
            )
        })
        .collect();

    format!(
        r#"Today's date: {date}

Summarize each of the following news articles in 2-3 sentences.
{neutral}
Format your response as a numbered list matching the order of the articles,
one article per line, for example:
1. First summary.
2. Second summary.

## ARTICLES:
----------
{listing}----------
{dont_tell_me}"#,
        date = current_date(),
        neutral = NEUTRAL_TONE,
        listing = listing,
        dont_tell_me = DONT_TELL_ME
    )
}
