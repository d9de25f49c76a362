//! Supervisor stage - final pass over specialist output.

use crate::domain::orchestration::Category;

/// Hook between the specialist and mention extraction.
///
/// Every category currently passes through unchanged.
#[derive(Debug, Clone, Default)]
pub struct Supervisor;

impl Supervisor {
    pub fn new() -> Self {
        Self
    }

    pub fn supervise(&self, specialist_text: String, category: Category) -> String {
        match category {
            Category::ImageText | Category::MentionExtract | Category::General => specialist_text,
        }
    }
}
