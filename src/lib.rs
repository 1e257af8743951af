pub mod article;
pub mod bills;
pub mod categorize;
pub mod dedup;
pub mod environment;
pub mod fact_check;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod priority;
pub mod prompt;
pub mod similarity;
pub mod summarize;
pub mod util;

pub use article::{ArticleRecord, BillImpact, Branch, Category, FactCheckStatus, RawArticle};
pub use environment::TriageConfig;
pub use llm::{LlmClient, LlmError, LlmGenerator, TextGenerator};
pub use pipeline::{Digest, DigestStats, Pipeline};

pub const TARGET_LLM_REQUEST: &str = "llm_request";
pub const TARGET_TRIAGE: &str = "triage";
pub const TARGET_FACT_CHECK: &str = "fact_check";
pub const TARGET_BILLS: &str = "bills";
