//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the orchestration core to external systems:
//! - `ai` - OpenAI chat and embeddings, plus mocks
//! - `document` - Text extraction and the local document directory
//! - `knowledge` - Directory-backed retrieval for knowledge mentions
//! - `speech` - Text-to-speech and audio publishing
//! - `probe` - Local path detection for the classifier
//! - `http` - axum REST endpoints

pub mod ai;
pub mod document;
pub mod http;
pub mod knowledge;
pub mod probe;
pub mod speech;

pub use probe::{FsResourceProbe, StaticResourceProbe};
