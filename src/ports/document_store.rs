//! Document Store Port - Listing and ingesting knowledge documents.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::ExtractionError;
use crate::domain::foundation::Timestamp;

/// A stored document as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Original upload name, without the timestamp prefix.
    pub name: String,
    /// File name on disk.
    pub stored_name: String,
    pub size: u64,
    pub uploaded_at: Timestamp,
}

/// Result of ingesting one upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub stored_name: String,
    pub original_name: String,
    pub size: u64,
    pub extracted_text: String,
    pub page_count: usize,
}

/// Port for the knowledge document directory.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists recognized documents, newest first. A missing directory is empty.
    async fn list(&self) -> Result<Vec<DocumentInfo>, DocumentStoreError>;

    /// Stores an upload and returns its extracted text.
    async fn store(
        &self,
        bytes: Vec<u8>,
        original_name: &str,
    ) -> Result<StoredDocument, DocumentStoreError>;
}

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("file too large: {size} bytes exceeds {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("file is empty")]
    Empty,

    #[error("no text could be extracted from {0}")]
    NoText(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}
