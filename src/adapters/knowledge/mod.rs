//! Knowledge adapters - document retrieval for knowledge-base mentions.

mod chunker;
mod directory_knowledge_base;
mod vector_index;

pub use chunker::chunk_text;
pub use directory_knowledge_base::{DirectoryKnowledgeBase, KnowledgeSettings};
pub use vector_index::{SearchHit, VectorIndex};
