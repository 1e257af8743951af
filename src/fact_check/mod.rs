//! Cross-outlet consistency checking.
//!
//! Articles whose headlines tell the same story are grouped, facts are pulled
//! out of each member, and a group whose members disagree on dates is
//! flagged. Independently, an article that hedges more than it attributes is
//! marked unverified on its own.

mod extraction;

pub use extraction::{extract_facts, FactSet};

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::article::{ArticleRecord, FactCheckStatus};
use crate::similarity::is_same_story;
use crate::util::word_patterns;
use crate::TARGET_FACT_CHECK;

/// Phrases that attribute a claim to a source.
pub const FACT_CUES: &[&str] = &[
    "announced",
    "reported",
    "said",
    "confirmed",
    "revealed",
    "stated",
    "according to",
    "sources say",
    "officials say",
    "experts say",
    "study shows",
    "research indicates",
    "data shows",
    "statistics show",
];

/// Phrases that hedge a claim.
pub const UNVERIFIED_CUES: &[&str] = &[
    "allegedly",
    "reportedly",
    "rumored",
    "speculation",
    "unconfirmed",
    "anonymous sources",
    "unnamed sources",
    "sources familiar with",
    "may",
    "might",
    "could",
    "possibly",
    "potentially",
];

lazy_static! {
    static ref FACT_CUE_PATTERNS: Vec<Regex> = word_patterns(FACT_CUES);
    static ref UNVERIFIED_CUE_PATTERNS: Vec<Regex> = word_patterns(UNVERIFIED_CUES);
}

/// Lifecycle of a group within one run.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupState {
    Grouped,
    Consistent,
    Flagged { conflicts: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoryGroup {
    /// Indices into the checked article slice, seed first.
    pub members: Vec<usize>,
    pub state: GroupState,
}

impl StoryGroup {
    pub fn is_flagged(&self) -> bool {
        matches!(self.state, GroupState::Flagged { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FactCheckReport {
    pub groups: Vec<StoryGroup>,
    pub statuses: Vec<FactCheckStatus>,
}

impl FactCheckReport {
    pub fn unverified_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|s| **s == FactCheckStatus::Unverified)
            .count()
    }
}

/// Partitions article indices into disjoint same-story groups.
///
/// Each unassigned article seeds a group and pulls in every later unassigned
/// article whose headline resembles the seed's. Articles with no peers form
/// singleton groups.
pub fn group_similar(articles: &[ArticleRecord]) -> Vec<StoryGroup> {
    let mut assigned = vec![false; articles.len()];
    let mut groups = Vec::new();

    for seed in 0..articles.len() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let mut members = vec![seed];

        for candidate in (seed + 1)..articles.len() {
            if !assigned[candidate]
                && is_same_story(&articles[seed].headline, &articles[candidate].headline)
            {
                assigned[candidate] = true;
                members.push(candidate);
            }
        }

        groups.push(StoryGroup {
            members,
            state: GroupState::Grouped,
        });
    }

    groups
}

/// Finds disagreements across the fact sets of one group.
///
/// Only dates count as conflicts. Numbers are compared and logged but never
/// flag a group, because differing amounts in a story are too often
/// legitimate.
pub fn find_conflicts(facts: &[FactSet]) -> Vec<String> {
    let mut conflicts = Vec::new();
    if facts.len() < 2 {
        return conflicts;
    }

    let dates: BTreeSet<&String> = facts.iter().flat_map(|f| f.dates.iter()).collect();
    let date_mentions: usize = facts.iter().map(|f| f.date_mentions).sum();
    if dates.len() > 1 && date_mentions > 1 {
        conflicts.push(format!("Conflicting dates: {:?}", dates));
    }

    let numbers: BTreeSet<&String> = facts.iter().flat_map(|f| f.numbers.iter()).collect();
    let number_mentions: usize = facts.iter().map(|f| f.number_mentions).sum();
    if numbers.len() > 1 && number_mentions > 1 {
        debug!(target: TARGET_FACT_CHECK, "Differing figures in group (not flagged): {:?}", numbers);
    }

    conflicts
}

/// True when an article hedges more than it attributes.
pub fn has_unverified_claims(text: &str) -> bool {
    let text = text.to_lowercase();
    let unverified = count_cues(&UNVERIFIED_CUE_PATTERNS, &text);
    let attributed = count_cues(&FACT_CUE_PATTERNS, &text);
    unverified > attributed && unverified > 0
}

fn count_cues(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().filter(|p| p.is_match(text)).count()
}

/// Runs grouping, conflict detection and the hedging check.
pub fn check(articles: &[ArticleRecord]) -> FactCheckReport {
    let mut statuses = vec![FactCheckStatus::Verified; articles.len()];
    let mut groups = group_similar(articles);

    for group in groups.iter_mut() {
        if group.members.len() < 2 {
            group.state = GroupState::Consistent;
            continue;
        }

        let facts: Vec<FactSet> = group
            .members
            .iter()
            .map(|&i| extract_facts(&articles[i].text()))
            .collect();
        let conflicts = find_conflicts(&facts);

        if conflicts.is_empty() {
            group.state = GroupState::Consistent;
        } else {
            warn!(
                target: TARGET_FACT_CHECK,
                "Inconsistency in group {:?}: {}", group.members, conflicts.join("; ")
            );
            for &i in &group.members {
                statuses[i] = FactCheckStatus::Unverified;
            }
            group.state = GroupState::Flagged { conflicts };
        }
    }

    for (i, article) in articles.iter().enumerate() {
        if has_unverified_claims(&article.text()) {
            debug!(target: TARGET_FACT_CHECK, "Unverified claims in '{}'", article.headline);
            statuses[i] = FactCheckStatus::Unverified;
        }
    }

    FactCheckReport { groups, statuses }
}

/// Returns the articles with `fact_check_status` set.
pub fn fact_check_articles(articles: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    let report = check(&articles);

    info!(
        target: TARGET_FACT_CHECK,
        "Fact checking complete: {} verified, {} unverified, {} multi-article groups",
        articles.len() - report.unverified_count(),
        report.unverified_count(),
        report.groups.iter().filter(|g| g.members.len() > 1).count()
    );

    articles
        .into_iter()
        .zip(report.statuses)
        .map(|(mut article, status)| {
            article.fact_check_status = status;
            article
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_is_disjoint_and_seeded_in_order() {
        let articles = vec![
            ArticleRecord::new("Senate passes budget bill", ""),
            ArticleRecord::new("Storm floods coastal towns overnight", ""),
            ArticleRecord::new("Senate passes budget bills", ""),
            ArticleRecord::new("Storm floods coastal town overnight", ""),
            ArticleRecord::new("Chess champion retires", ""),
        ];

        let groups = group_similar(&articles);
        let members: Vec<Vec<usize>> = groups.iter().map(|g| g.members.clone()).collect();
        assert_eq!(members, vec![vec![0, 2], vec![1, 3], vec![4]]);
        assert!(groups.iter().all(|g| g.state == GroupState::Grouped));
    }

    #[test]
    fn test_empty_headlines_are_not_grouped() {
        let articles = vec![ArticleRecord::new("", "a"), ArticleRecord::new("", "b")];
        assert_eq!(group_similar(&articles).len(), 2);
    }

    #[test]
    fn test_date_conflict_flags_whole_group() {
        let articles = vec![
            ArticleRecord::new("Senate passes budget bill", "The vote happened on 3/14/2024."),
            ArticleRecord::new("Senate passes budget bills", "The vote happened on 3/15/2024."),
            ArticleRecord::new("Chess champion retires", "The champion said goodbye."),
        ];

        let report = check(&articles);
        assert_eq!(
            report.statuses,
            vec![
                FactCheckStatus::Unverified,
                FactCheckStatus::Unverified,
                FactCheckStatus::Verified
            ]
        );
        assert!(report.groups[0].is_flagged());
        assert_eq!(report.groups[1].state, GroupState::Consistent);
    }

    #[test]
    fn test_agreeing_group_and_numeric_differences_stay_verified() {
        let articles = vec![
            ArticleRecord::new("Senate passes budget bill", "Officials said the vote was in 2024 for $5 billion."),
            ArticleRecord::new("Senate passes budget bills", "Officials said the 2024 vote covered $6 billion."),
        ];

        let report = check(&articles);
        assert_eq!(report.statuses, vec![FactCheckStatus::Verified; 2]);
        assert_eq!(report.groups[0].state, GroupState::Consistent);
    }

    #[test]
    fn test_unverified_cues() {
        assert!(has_unverified_claims("The CEO allegedly could resign"));
        assert!(!has_unverified_claims("The CEO allegedly resigned, officials say"));
        assert!(!has_unverified_claims("The mayor opened a bridge"));
        assert!(!has_unverified_claims(""));
        // "reported" is an attribution, "reportedly" a hedge
        assert!(has_unverified_claims("The deal reportedly closed"));
        assert!(!has_unverified_claims("The deal was reported closed"));
    }

    #[test]
    fn test_cue_override_applies_to_singletons() {
        let articles = vec![
            ArticleRecord::new("Merger talks", "Two firms might merge, possibly this week."),
            ArticleRecord::new("Bridge opens", "The city confirmed the opening."),
        ];

        let checked = fact_check_articles(articles);
        assert_eq!(checked[0].fact_check_status, FactCheckStatus::Unverified);
        assert_eq!(checked[1].fact_check_status, FactCheckStatus::Verified);
    }

    #[test]
    fn test_single_fact_set_has_no_conflicts() {
        let facts = vec![extract_facts("In 2023 and 2024")];
        assert!(find_conflicts(&facts).is_empty());
    }
}
