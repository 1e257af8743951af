use chrono::Local;

/// Upper bound on the article text placed in a single-article prompt.
pub const MAX_ARTICLE_CHARS: usize = 2000;

/// Upper bound on the text of each article inside a batch prompt.
pub const MAX_BATCH_ARTICLE_CHARS: usize = 600;

// Common text blocks for all prompts
pub const DONT_TELL_ME: &str = r#"
Important instructions for your responses:

1. Do not narrate or describe your actions.
2. Do not summarize or restate the instructions I've given you.
3. Do not preface your responses with phrases like "Here's a summary..." or "I will now..."
4. Do not acknowledge or confirm that you understand these instructions.
5. Simply answer directly, without any meta-commentary.
"#;

pub const NEUTRAL_TONE: &str = r#"
Tone requirements:
- Remove political bias and emotionally charged language.
- Keep every sentence objective and attributable to the article.
- Do not add facts that are not in the article.
"#;

/// Utility function to get the current date in a human-readable format
pub fn current_date() -> String {
    let today = Local::now();
    format!(
        "{} {}, {}",
        today.format("%B"),
        today.format("%-d"),
        today.format("%Y")
    )
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub fn bounded(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
