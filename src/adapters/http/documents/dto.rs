//! HTTP DTOs for document endpoints.

use serde::Serialize;

use crate::ports::DocumentInfo;

/// Listing of knowledge documents, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentInfo>,
    pub count: usize,
}

impl From<Vec<DocumentInfo>> for DocumentListResponse {
    fn from(documents: Vec<DocumentInfo>) -> Self {
        Self {
            count: documents.len(),
            documents,
        }
    }
}
