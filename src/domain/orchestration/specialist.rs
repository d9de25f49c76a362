//! Specialist roles and their generation profiles.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;

/// A language-model role with its own system prompt and sampling profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialistRole {
    /// Main conversational agent. Sees the replayed turn log.
    Principal,
    /// Internal router. Never answers the user directly.
    Classifier,
    MentionProcessor,
    ImageProcessor,
}

impl SpecialistRole {
    pub const ALL: [SpecialistRole; 4] = [
        SpecialistRole::Principal,
        SpecialistRole::Classifier,
        SpecialistRole::MentionProcessor,
        SpecialistRole::ImageProcessor,
    ];

    /// Specialist that answers a given category.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::ImageText => SpecialistRole::ImageProcessor,
            Category::MentionExtract => SpecialistRole::MentionProcessor,
            Category::General => SpecialistRole::Principal,
        }
    }

    /// Whether prior turns are replayed before the current input.
    pub fn replays_history(&self) -> bool {
        matches!(self, SpecialistRole::Principal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialistRole::Principal => "principal",
            SpecialistRole::Classifier => "classifier",
            SpecialistRole::MentionProcessor => "mention_processor",
            SpecialistRole::ImageProcessor => "image_processor",
        }
    }
}

impl fmt::Display for SpecialistRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling parameters for one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationProfile {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationProfile {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    /// Built-in profile for a role.
    pub fn default_for(role: SpecialistRole) -> Self {
        match role {
            SpecialistRole::Principal => Self::new(0.8, 1500),
            SpecialistRole::Classifier => Self::new(0.1, 50),
            SpecialistRole::MentionProcessor => Self::new(0.0, 200),
            SpecialistRole::ImageProcessor => Self::new(0.7, 1000),
        }
    }
}
