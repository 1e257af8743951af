use regex::Regex;

/// Pulls the items out of a model's numbered-list reply.
///
/// A line counts as an item when its first non-blank character is a digit.
/// The item text is whatever follows the first `.`, or the whole line when
/// there is none. Blank items are skipped.
pub fn parse_numbered_list(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .filter_map(|line| {
            let item = match line.split_once('.') {
                Some((_, rest)) => rest.trim(),
                None => line,
            };
            (!item.is_empty()).then(|| item.to_string())
        })
        .collect()
}

/// One case-insensitive regex matching any of `words` as whole words.
///
/// Only used to build static keyword tables; escaped words always compile.
pub fn word_list_pattern(words: &[&str]) -> Regex {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).unwrap()
}

/// One case-insensitive whole-word regex per entry of `words`, for counting
/// how many distinct keywords a text contains.
pub fn word_patterns(words: &[&str]) -> Vec<Regex> {
    words.iter().map(|w| word_list_pattern(&[*w])).collect()
}

/// Splits text into trimmed, non-empty sentences on `.`.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split('.').map(str::trim).filter(|s| !s.is_empty())
}

/// Cuts `text` to `max_chars` characters and appends `...`.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_list() {
        let response = "Here you go:\n1. Technology\n  2. Finance \n\n3.\nNot numbered\n4) World";
        assert_eq!(
            parse_numbered_list(response),
            vec!["Technology", "Finance", "4) World"]
        );
    }

    #[test]
    fn test_parse_numbered_list_keeps_text_after_first_dot() {
        let response = "1. The Fed raised rates. Markets fell.";
        assert_eq!(
            parse_numbered_list(response),
            vec!["The Fed raised rates. Markets fell."]
        );
        assert!(parse_numbered_list("no list here").is_empty());
    }

    #[test]
    fn test_word_patterns_match_whole_words_only() {
        let pattern = word_list_pattern(&["nato", "interest rate"]);
        assert!(pattern.is_match("NATO leaders meet"));
        assert!(pattern.is_match("an interest rate cut"));
        assert!(!pattern.is_match("senators debate"));
        assert!(!pattern.is_match("interest rates"));

        let patterns = word_patterns(&["may", "m&a"]);
        assert_eq!(patterns.len(), 2);
        assert!(patterns[1].is_match("a wave of M&A deals"));
        assert!(!patterns[0].is_match("mayor"));
    }

    #[test]
    fn test_sentences_and_truncation() {
        let split: Vec<&str> = sentences("One. Two three.  . Four").collect();
        assert_eq!(split, vec!["One", "Two three", "Four"]);
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
    }
}
