//! Input categories chosen by the classifier stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category reported when a turn fails to generate.
pub const ERROR_CATEGORY: &str = "error";

/// Routing category for a user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The input names an existing local resource to extract text from.
    ImageText,
    /// The input carries `@[label](id)` mentions.
    MentionExtract,
    /// Everything else.
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ImageText => "image_text",
            Category::MentionExtract => "mention_extract",
            Category::General => "general",
        }
    }

    /// Parses classifier output after trimming and lower-casing it.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "image_text" => Some(Category::ImageText),
            "mention_extract" => Some(Category::MentionExtract),
            "general" => Some(Category::General),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the user input reached the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    #[default]
    Text,
    Image,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_label_normalizes_case_and_whitespace() {
        assert_eq!(Category::parse_label("  GENERAL\n"), Some(Category::General));
        assert_eq!(
            Category::parse_label("Mention_Extract"),
            Some(Category::MentionExtract)
        );
        assert_eq!(Category::parse_label("image_text"), Some(Category::ImageText));
    }

    #[test]
    fn parse_label_rejects_unknown_values() {
        assert_eq!(Category::parse_label("chit-chat"), None);
        assert_eq!(Category::parse_label(""), None);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(Category::MentionExtract.to_string(), "mention_extract");
    }
}
