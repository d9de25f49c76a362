//! Document adapters - text extraction and the local document directory.

mod local_document_store;
mod text_extractor;

pub use local_document_store::LocalDocumentStore;
pub use text_extractor::DocumentTextExtractor;
