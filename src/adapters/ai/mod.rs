//! AI adapters - chat completion and embedding providers.

mod mock_embeddings;
mod mock_provider;
mod openai_embeddings;
mod openai_provider;

pub use mock_embeddings::MockEmbeddingProvider;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_embeddings::OpenAIEmbeddingProvider;
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
