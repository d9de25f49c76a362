//! Knowledge Base Port - Answers questions from a directory of documents.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use super::{AIError, EmbeddingError, ExtractionError};

/// Port for the auxiliary retrieval step triggered by knowledge-base mentions.
///
/// # Contract
///
/// - A missing directory is created and yields `Ok(None)`.
/// - A directory without recognized documents yields `Ok(None)`.
/// - Otherwise the answer generated from the best-matching passages is returned.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn answer(&self, document_dir: &Path, question: &str)
        -> Result<Option<String>, KnowledgeError>;
}

/// Retrieval failures. Callers treat every variant as "no answer".
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("document directory error: {0}")]
    Io(#[from] std::io::Error),

    #[error("text extraction failed for {file}: {source}")]
    Extraction {
        file: String,
        #[source]
        source: ExtractionError,
    },

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("answer generation failed: {0}")]
    Generation(#[from] AIError),
}
