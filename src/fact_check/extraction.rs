use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    // Numeric dates (3/14/2024, 14-03-24) and bare four digit years.
    static ref DATE_PATTERN: Regex =
        Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b|\b\d{4}\b").unwrap();

    // Percentages, dollar amounts and "N million/billion/thousand" phrases.
    static ref NUMBER_PATTERN: Regex = Regex::new(
        r"\b\d+(?:\.\d+)?%|\$\d+(?:,\d{3})*(?:\.\d{2})?\b|\b\d+(?:\.\d+)?\s*(?:million|billion|thousand)\b"
    )
    .unwrap();

    // Two capitalized words in a row.
    static ref NAME_PATTERN: Regex = Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b").unwrap();

    static ref ORGANIZATION_PATTERN: Regex = Regex::new(
        r"\b[A-Z][A-Z\s&]+(?:Corp|Inc|LLC|Ltd|Company|Organization|Foundation)\b"
    )
    .unwrap();
}

/// Values pulled out of one article's text for cross-checking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSet {
    pub dates: BTreeSet<String>,
    pub numbers: BTreeSet<String>,
    pub names: BTreeSet<String>,
    pub organizations: BTreeSet<String>,
    /// Raw date matches, repeats included.
    pub date_mentions: usize,
    /// Raw number matches, repeats included.
    pub number_mentions: usize,
}

impl FactSet {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
            && self.numbers.is_empty()
            && self.names.is_empty()
            && self.organizations.is_empty()
    }
}

pub fn extract_facts(text: &str) -> FactSet {
    if text.trim().is_empty() {
        return FactSet::default();
    }

    let dates: Vec<&str> = DATE_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
    let numbers: Vec<&str> = NUMBER_PATTERN.find_iter(text).map(|m| m.as_str()).collect();

    FactSet {
        date_mentions: dates.len(),
        number_mentions: numbers.len(),
        dates: dates.into_iter().map(str::to_string).collect(),
        numbers: numbers.into_iter().map(str::to_string).collect(),
        names: collect_matches(&NAME_PATTERN, text),
        organizations: collect_matches(&ORGANIZATION_PATTERN, text),
    }
}

fn collect_matches(pattern: &Regex, text: &str) -> BTreeSet<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_dates_and_years() {
        let facts = extract_facts("Signed on 3/14/2024 and effective 1-1-25, reviewed again in 2026 and 2026.");
        assert!(facts.dates.contains("3/14/2024"));
        assert!(facts.dates.contains("1-1-25"));
        assert!(facts.dates.contains("2026"));
        assert_eq!(facts.dates.len(), 3);
        assert_eq!(facts.date_mentions, 4);
    }

    #[test]
    fn test_extracts_quantities() {
        let facts = extract_facts("Prices rose 3.5% to $1,250.00 after a 40 billion deal.");
        assert!(facts.numbers.contains("3.5%"));
        assert!(facts.numbers.contains("$1,250.00"));
        assert!(facts.numbers.contains("40 billion"));
    }

    #[test]
    fn test_extracts_names_and_organizations() {
        let facts = extract_facts("Jane Doe joined ACME Corp last week.");
        assert!(facts.names.contains("Jane Doe"));
        assert!(facts.organizations.contains("ACME Corp"));
    }

    #[test]
    fn test_empty_text_has_no_facts() {
        assert!(extract_facts("").is_empty());
        assert!(extract_facts("nothing to see here").is_empty());
    }
}
