//! Ports - Interfaces between the orchestration core and the outside world.
//!
//! Adapters implement these traits; the application layer depends only on
//! the traits, so every collaborator can be swapped for a mock in tests.

mod ai_provider;
mod document_store;
mod embedding_provider;
mod knowledge_base;
mod resource_probe;
mod speech_synthesizer;
mod text_extractor;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use document_store::{DocumentInfo, DocumentStore, DocumentStoreError, StoredDocument};
pub use embedding_provider::{EmbeddingError, EmbeddingProvider};
pub use knowledge_base::{KnowledgeBase, KnowledgeError};
pub use resource_probe::ResourceProbe;
pub use speech_synthesizer::{SpeechError, SpeechSynthesizer};
pub use text_extractor::{ExtractedText, ExtractionError, TextExtractor};
