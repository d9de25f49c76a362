//! Embedding Provider Port - Interface for text embedding models.

use async_trait::async_trait;
use thiserror::Error;

/// Port for turning text into dense vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds every input, returning one vector per input in the same order.
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Model identifier, part of the retrieval cache key.
    fn model(&self) -> &str;
}

/// Embedding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),

    #[error("embedding authentication failed")]
    AuthenticationFailed,

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

impl EmbeddingError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}
