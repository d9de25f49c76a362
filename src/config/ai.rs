//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::OpenAIConfig;

/// OpenAI connection settings shared by chat, embeddings and speech.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Chat completion model
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds, also the pipeline's generation bound
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on transient failures
    #[serde(default)]
    pub max_retries: u32,

    /// Embedding model for the knowledge index
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Connection settings for the chat model.
    pub fn chat_settings(&self) -> Result<OpenAIConfig, ValidationError> {
        Ok(self.base_settings()?.with_model(self.model.clone()))
    }

    /// Connection settings for the embedding model.
    pub fn embedding_settings(&self) -> Result<OpenAIConfig, ValidationError> {
        Ok(self.base_settings()?.with_model(self.embedding_model.clone()))
    }

    /// Connection settings for another model on the same account.
    pub fn settings_for_model(&self, model: &str) -> Result<OpenAIConfig, ValidationError> {
        Ok(self.base_settings()?.with_model(model))
    }

    fn base_settings(&self) -> Result<OpenAIConfig, ValidationError> {
        let key = self
            .openai_api_key
            .clone()
            .filter(|_| self.has_openai())
            .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;

        Ok(OpenAIConfig::from_secret(key)
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries))
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
            embedding_model: default_embedding_model(),
        }
    }
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}
