use std::env;
use tracing::warn;

use crate::priority::DEFAULT_TOP_N;
use crate::TARGET_TRIAGE;

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// Empty entries are dropped, so an unset variable yields an empty vector.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    env::var(var)
        .unwrap_or_default()
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Reads a boolean flag; `1`, `true` and `yes` (any case) count as set.
pub fn get_env_var_as_bool(var: &str) -> bool {
    env::var(var)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Run settings that do not concern the language model.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageConfig {
    pub top_n: usize,
    pub extra_trusted_sources: Vec<String>,
    pub bills_all_categories: bool,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            extra_trusted_sources: Vec::new(),
            bills_all_categories: false,
        }
    }
}

impl TriageConfig {
    pub fn from_env() -> Self {
        let top_n = match env::var("NEWSDESK_TOP_N") {
            Ok(value) => value.trim().parse().unwrap_or_else(|_| {
                warn!(target: TARGET_TRIAGE, "Ignoring invalid NEWSDESK_TOP_N '{}'", value);
                DEFAULT_TOP_N
            }),
            Err(_) => DEFAULT_TOP_N,
        };

        Self {
            top_n,
            extra_trusted_sources: get_env_var_as_vec("NEWSDESK_EXTRA_TRUSTED_SOURCES", ';'),
            bills_all_categories: get_env_var_as_bool("NEWSDESK_BILLS_ALL_CATEGORIES"),
        }
    }
}
