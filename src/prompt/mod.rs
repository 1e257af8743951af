// Declare submodules
mod categorization;
mod common;
mod summarization;

pub use categorization::{batch_categorization_prompt, categorization_prompt, CATEGORY_DEFINITIONS};
pub use common::*;
pub use summarization::{batch_summary_prompt, summary_prompt};
