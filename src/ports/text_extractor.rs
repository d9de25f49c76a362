//! Text Extractor Port - Pulls plain text out of uploaded documents.

use thiserror::Error;

/// Plain text recovered from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

impl ExtractedText {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Port for document text extraction.
///
/// Extraction is CPU-bound; async callers should run it on a blocking thread.
pub trait TextExtractor: Send + Sync {
    /// Extracts text from the raw bytes of a file with the given extension.
    fn extract(&self, bytes: &[u8], extension: &str) -> Result<ExtractedText, ExtractionError>;

    /// Whether files with this (lower-case, dot-less) extension are understood.
    fn supports(&self, extension: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    #[error("malformed document: {0}")]
    Malformed(String),
}

impl ExtractionError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
