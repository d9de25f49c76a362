//! Specialist generation profiles

use serde::Deserialize;
use std::path::PathBuf;

use super::error::{ConfigError, ValidationError};
use crate::domain::orchestration::{GenerationProfile, SpecialistRole};

/// Sampling settings for one role.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ProfileConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ProfileConfig {
    fn for_role(role: SpecialistRole) -> Self {
        let profile = GenerationProfile::default_for(role);
        Self {
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
        }
    }

    fn validate(&self, role: &'static str) -> Result<(), ValidationError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature(role));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens(role));
        }
        Ok(())
    }
}

impl From<ProfileConfig> for GenerationProfile {
    fn from(config: ProfileConfig) -> Self {
        GenerationProfile::new(config.temperature, config.max_tokens)
    }
}

/// Per-role profiles and the optional principal prompt override.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialistsConfig {
    #[serde(default = "principal_default")]
    pub principal: ProfileConfig,

    #[serde(default = "classifier_default")]
    pub classifier: ProfileConfig,

    #[serde(default = "mention_processor_default")]
    pub mention_processor: ProfileConfig,

    #[serde(default = "image_processor_default")]
    pub image_processor: ProfileConfig,

    /// File whose contents replace the built-in principal prompt
    pub principal_prompt_path: Option<PathBuf>,
}

impl SpecialistsConfig {
    pub fn profile(&self, role: SpecialistRole) -> GenerationProfile {
        match role {
            SpecialistRole::Principal => self.principal.into(),
            SpecialistRole::Classifier => self.classifier.into(),
            SpecialistRole::MentionProcessor => self.mention_processor.into(),
            SpecialistRole::ImageProcessor => self.image_processor.into(),
        }
    }

    /// Reads the principal prompt override, if configured.
    pub fn load_principal_prompt(&self) -> Result<Option<String>, ConfigError> {
        let Some(path) = &self.principal_prompt_path else {
            return Ok(None);
        };
        std::fs::read_to_string(path)
            .map(Some)
            .map_err(|source| ConfigError::PromptFile {
                path: path.clone(),
                source,
            })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.principal.validate("principal")?;
        self.classifier.validate("classifier")?;
        self.mention_processor.validate("mention_processor")?;
        self.image_processor.validate("image_processor")?;
        Ok(())
    }
}

impl Default for SpecialistsConfig {
    fn default() -> Self {
        Self {
            principal: principal_default(),
            classifier: classifier_default(),
            mention_processor: mention_processor_default(),
            image_processor: image_processor_default(),
            principal_prompt_path: None,
        }
    }
}

fn principal_default() -> ProfileConfig {
    ProfileConfig::for_role(SpecialistRole::Principal)
}

fn classifier_default() -> ProfileConfig {
    ProfileConfig::for_role(SpecialistRole::Classifier)
}

fn mention_processor_default() -> ProfileConfig {
    ProfileConfig::for_role(SpecialistRole::MentionProcessor)
}

fn image_processor_default() -> ProfileConfig {
    ProfileConfig::for_role(SpecialistRole::ImageProcessor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_role_profiles() {
        let config = SpecialistsConfig::default();
        for role in SpecialistRole::ALL {
            assert_eq!(config.profile(role), GenerationProfile::default_for(role));
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_temperature_out_of_range_fails() {
        let config = SpecialistsConfig {
            classifier: ProfileConfig {
                temperature: 2.5,
                max_tokens: 50,
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTemperature("classifier"))
        );
    }

    #[test]
    fn test_zero_token_budget_fails() {
        let config = SpecialistsConfig {
            principal: ProfileConfig {
                temperature: 0.8,
                max_tokens: 0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_principal_prompt_override_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Você é um assistente.").unwrap();

        let config = SpecialistsConfig {
            principal_prompt_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(
            config.load_principal_prompt().unwrap().as_deref(),
            Some("Você é um assistente.")
        );
    }

    #[test]
    fn test_missing_prompt_file_is_an_error() {
        let config = SpecialistsConfig {
            principal_prompt_path: Some(PathBuf::from("/nonexistent/prompt.txt")),
            ..Default::default()
        };
        assert!(matches!(
            config.load_principal_prompt(),
            Err(ConfigError::PromptFile { .. })
        ));
    }
}
