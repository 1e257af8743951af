//! Article records and the structured values attached to them as they move
//! through the triage stages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Topical label assigned to every article.
///
/// Declaration order matters: local keyword matching walks the categories in
/// this order and the first hit wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Category {
    Technology,
    Health,
    #[serde(rename = "Government/Policy")]
    GovernmentPolicy,
    Economy,
    Finance,
    World,
    Space,
    #[default]
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Health,
        Category::GovernmentPolicy,
        Category::Economy,
        Category::Finance,
        Category::World,
        Category::Space,
        Category::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Health => "Health",
            Category::GovernmentPolicy => "Government/Policy",
            Category::Economy => "Economy",
            Category::Finance => "Finance",
            Category::World => "World",
            Category::Space => "Space",
            Category::Miscellaneous => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FactCheckStatus {
    #[default]
    Verified,
    Unverified,
}

impl fmt::Display for FactCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactCheckStatus::Verified => write!(f, "Verified"),
            FactCheckStatus::Unverified => write!(f, "Unverified"),
        }
    }
}

/// Legislative branch that passed a bill, as far as the article text says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    House,
    Senate,
    Both,
    #[default]
    Unknown,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::House => write!(f, "house"),
            Branch::Senate => write!(f, "senate"),
            Branch::Both => write!(f, "both"),
            Branch::Unknown => write!(f, "unknown"),
        }
    }
}

/// Publisher field as it arrives from a feed: either a bare name or a
/// NewsAPI-style `{ "id": ..., "name": ... }` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSource {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Default for RawSource {
    fn default() -> Self {
        RawSource::Name(String::new())
    }
}

impl RawSource {
    pub fn name(&self) -> &str {
        match self {
            RawSource::Name(name) => name,
            RawSource::Object { name } => name.as_deref().unwrap_or(""),
        }
    }
}

/// One entry as handed over by the fetch collaborator. Every field is
/// optional; missing values become empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    #[serde(default, alias = "title")]
    pub headline: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<String>,
}

/// One news item flowing through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub headline: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    pub source: String,
    pub published_at: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<f64>,
    #[serde(default)]
    pub fact_check_status: FactCheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Index into the run's bill impact list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_impact: Option<usize>,
}

impl From<RawArticle> for ArticleRecord {
    fn from(raw: RawArticle) -> Self {
        let description = raw.description.unwrap_or_default();
        let content = match raw.content {
            Some(content) if !content.trim().is_empty() => content,
            _ => description.clone(),
        };

        ArticleRecord {
            headline: raw.headline.unwrap_or_default(),
            content,
            description,
            url: raw.url.unwrap_or_default(),
            source: raw.source.unwrap_or_default().name().to_string(),
            published_at: raw.published_at.unwrap_or_default(),
            ..Default::default()
        }
    }
}

impl ArticleRecord {
    pub fn new(headline: &str, content: &str) -> Self {
        ArticleRecord {
            headline: headline.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_published_at(mut self, published_at: &str) -> Self {
        self.published_at = published_at.to_string();
        self
    }

    /// True when neither the headline nor the content carries any text.
    pub fn is_empty(&self) -> bool {
        self.headline.trim().is_empty() && self.content.trim().is_empty()
    }

    /// Headline followed by the content, the text most stages scan.
    pub fn text(&self) -> String {
        format!("{} {}", self.headline, self.content)
    }

    /// Headline, description and content, without repeating the description
    /// when the content was filled from it.
    pub fn full_text(&self) -> String {
        if self.description.is_empty() || self.description == self.content {
            self.text()
        } else {
            format!("{} {} {}", self.headline, self.description, self.content)
        }
    }
}

/// A detected legislative event and the sectors and companies it touches.
///
/// Only [`BillImpact::new`] builds one, and it refuses when neither a name
/// nor a number was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillImpact {
    source_article_id: usize,
    headline: String,
    bill_name: Option<String>,
    bill_number: Option<String>,
    branch_passed: Branch,
    explanation: String,
    sectors_affected: BTreeSet<String>,
    companies_affected: Vec<String>,
}

impl BillImpact {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_article_id: usize,
        headline: &str,
        bill_name: Option<String>,
        bill_number: Option<String>,
        branch_passed: Branch,
        explanation: String,
        sectors_affected: BTreeSet<String>,
        companies_affected: Vec<String>,
    ) -> Option<Self> {
        if bill_name.is_none() && bill_number.is_none() {
            return None;
        }

        Some(BillImpact {
            source_article_id,
            headline: headline.to_string(),
            bill_name,
            bill_number,
            branch_passed,
            explanation,
            sectors_affected,
            companies_affected,
        })
    }

    pub fn source_article_id(&self) -> usize {
        self.source_article_id
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn bill_name(&self) -> Option<&str> {
        self.bill_name.as_deref()
    }

    pub fn bill_number(&self) -> Option<&str> {
        self.bill_number.as_deref()
    }

    pub fn branch_passed(&self) -> Branch {
        self.branch_passed
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn sectors_affected(&self) -> &BTreeSet<String> {
        &self.sectors_affected
    }

    pub fn companies_affected(&self) -> &[String] {
        &self.companies_affected
    }

    /// Name used when displaying the bill: its title, else its number.
    pub fn display_name(&self) -> &str {
        self.bill_name
            .as_deref()
            .or(self.bill_number.as_deref())
            .unwrap_or("Unknown Bill")
    }
}
