use crate::article::ArticleRecord;
use crate::prompt::common::{bounded, DONT_TELL_ME, MAX_ARTICLE_CHARS, MAX_BATCH_ARTICLE_CHARS};

/// The seven topical categories offered to the model. Anything else is
/// Miscellaneous.
pub const CATEGORY_DEFINITIONS: &str = r#"
- Technology: software, hardware, artificial intelligence, the internet, gadgets and the companies that build them.
- Health: medicine, disease, vaccines, public health, hospitals and wellness.
- Government/Policy: legislation, regulation, elections, courts and government action.
- Economy: GDP, inflation, employment, trade and the broader economy.
- Finance: stock markets, earnings, mergers and acquisitions, banking and investing.
- World: international affairs, diplomacy, conflicts and events outside the United States.
- Space: space exploration, rockets, satellites, astronomy and space agencies.
"#;

/// Generate a prompt asking for the category of a single article
pub fn categorization_prompt(article_text: &str) -> String {
    format!(
        r#"## ARTICLE (FOR CATEGORIZATION):
----------
{article}
----------

Assign this article to exactly one of the following categories:
{definitions}
If none of the categories fit, answer "Miscellaneous".

Respond with the category name only.
{dont_tell_me}"#,
        article = bounded(article_text, MAX_ARTICLE_CHARS),
        definitions = CATEGORY_DEFINITIONS,
        dont_tell_me = DONT_TELL_ME
    )
}

/// Generate a prompt asking for the categories of several articles at once
pub fn batch_categorization_prompt(articles: &[ArticleRecord]) -> String {
    let listing: String = articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            format!(
                "{}. {}\n",
                i + 1,
                bounded(&article.full_text(), MAX_BATCH_ARTICLE_CHARS).replace('\n', " ")
            )
        })
        .collect();

    format!(
        r#"## ARTICLES (FOR CATEGORIZATION):
----------
{listing}----------

Assign each article above to exactly one of the following categories:
{definitions}
If none of the categories fit an article, use "Miscellaneous".

Respond with a numbered list in the same order as the articles, one line per
article, containing only the category name, for example:
1. Technology
2. Finance
{dont_tell_me}"#,
        listing = listing,
        definitions = CATEGORY_DEFINITIONS,
        dont_tell_me = DONT_TELL_ME
    )
}
