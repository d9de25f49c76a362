//! Directory Knowledge Base - retrieval-augmented answers over a folder of documents.
//!
//! Each query enumerates the folder, hashes the document set and reuses the
//! cached passage index when the hash is unchanged. Otherwise every document
//! is extracted, chunked and embedded again before the question is answered.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use super::chunker::chunk_text;
use super::vector_index::{SearchHit, VectorIndex};
use crate::domain::orchestration::GenerationProfile;
use crate::ports::{
    AIProvider, CompletionRequest, EmbeddingProvider, KnowledgeBase, KnowledgeError,
    MessageRole, RequestMetadata, TextExtractor,
};

const ANSWER_PROMPT: &str = "\
Você responde perguntas usando somente os trechos de documentos fornecidos.
Se os trechos não contiverem a resposta, diga que a informação não foi encontrada nos documentos.
Responda em português, de forma clara e objetiva.";

/// Retrieval settings.
#[derive(Debug, Clone)]
pub struct KnowledgeSettings {
    /// Lower-case extensions without the leading dot.
    pub extensions: Vec<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub cache_index: bool,
    pub answer_profile: GenerationProfile,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string()],
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 4,
            cache_index: true,
            answer_profile: GenerationProfile::new(0.3, 800),
        }
    }
}

/// A document read from disk.
struct SourceDocument {
    name: String,
    bytes: Vec<u8>,
}

struct CachedIndex {
    dir: PathBuf,
    content_hash: String,
    index: Arc<VectorIndex>,
}

/// Knowledge base backed by a document directory.
pub struct DirectoryKnowledgeBase {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    ai_provider: Arc<dyn AIProvider>,
    settings: KnowledgeSettings,
    cache: Mutex<Option<CachedIndex>>,
}

impl DirectoryKnowledgeBase {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        ai_provider: Arc<dyn AIProvider>,
        settings: KnowledgeSettings,
    ) -> Self {
        Self {
            extractor,
            embedder,
            ai_provider,
            settings,
            cache: Mutex::new(None),
        }
    }

    fn is_recognized(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .map(|ext| self.settings.extensions.iter().any(|e| *e == ext))
            .unwrap_or(false)
    }

    /// Reads every recognized document, sorted by file name.
    async fn read_documents(&self, dir: &Path) -> Result<Vec<SourceDocument>, KnowledgeError> {
        let mut entries = fs::read_dir(dir).await?;
        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.is_recognized(&name) || !entry.file_type().await?.is_file() {
                continue;
            }
            let bytes = fs::read(entry.path()).await?;
            documents.push(SourceDocument { name, bytes });
        }
        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(documents)
    }

    /// Hash of the document set plus everything else that shapes the index.
    fn content_hash(&self, documents: &[SourceDocument]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.embedder.model().as_bytes());
        hasher.update(self.settings.chunk_size.to_le_bytes());
        hasher.update(self.settings.chunk_overlap.to_le_bytes());
        for doc in documents {
            hasher.update(doc.name.as_bytes());
            hasher.update((doc.bytes.len() as u64).to_le_bytes());
            hasher.update(&doc.bytes);
        }
        hex::encode(hasher.finalize())
    }

    async fn build_index(&self, documents: Vec<SourceDocument>) -> Result<VectorIndex, KnowledgeError> {
        let mut sources = Vec::new();
        let mut passages = Vec::new();

        for doc in documents {
            let extension = Path::new(&doc.name)
                .extension()
                .map(|e| e.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();
            let extractor = Arc::clone(&self.extractor);
            let name = doc.name.clone();
            let extracted = tokio::task::spawn_blocking(move || extractor.extract(&doc.bytes, &extension))
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

            match extracted {
                Ok(text) => {
                    tracing::debug!(file = %name, pages = text.page_count, "Document loaded");
                    for chunk in chunk_text(&text.text, self.settings.chunk_size, self.settings.chunk_overlap) {
                        sources.push(name.clone());
                        passages.push(chunk);
                    }
                }
                Err(source) => {
                    tracing::warn!(
                        error = %KnowledgeError::Extraction { file: name.clone(), source },
                        "Skipping unreadable document"
                    );
                }
            }
        }

        let mut index = VectorIndex::new();
        if passages.is_empty() {
            return Ok(index);
        }

        let embeddings = self.embedder.embed(&passages).await?;
        for ((source, text), embedding) in sources.into_iter().zip(passages).zip(embeddings) {
            index.insert(source, text, embedding);
        }
        Ok(index)
    }

    /// Returns the index for the current document set, rebuilding on change.
    async fn index_for(
        &self,
        dir: &Path,
        documents: Vec<SourceDocument>,
    ) -> Result<Arc<VectorIndex>, KnowledgeError> {
        if !self.settings.cache_index {
            return Ok(Arc::new(self.build_index(documents).await?));
        }

        let content_hash = self.content_hash(&documents);
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.dir == dir && cached.content_hash == content_hash {
                tracing::debug!(hash = %content_hash, "Reusing cached knowledge index");
                return Ok(Arc::clone(&cached.index));
            }
        }

        let index = Arc::new(self.build_index(documents).await?);
        tracing::info!(passages = index.len(), hash = %content_hash, "Knowledge index built");
        *cache = Some(CachedIndex {
            dir: dir.to_path_buf(),
            content_hash,
            index: Arc::clone(&index),
        });
        Ok(index)
    }

    fn answer_request(&self, question: &str, hits: &[SearchHit]) -> CompletionRequest {
        let context = hits
            .iter()
            .enumerate()
            .map(|(i, hit)| format!("[{}] ({})\n{}", i + 1, hit.source, hit.text))
            .collect::<Vec<_>>()
            .join("\n\n");

        CompletionRequest::new(RequestMetadata::new(None, "knowledge_base"))
            .with_system_prompt(ANSWER_PROMPT)
            .with_message(
                MessageRole::User,
                format!("Trechos:\n{}\n\nPergunta: {}", context, question),
            )
            .with_temperature(self.settings.answer_profile.temperature)
            .with_max_tokens(self.settings.answer_profile.max_tokens)
    }
}

#[async_trait]
impl KnowledgeBase for DirectoryKnowledgeBase {
    async fn answer(
        &self,
        document_dir: &Path,
        question: &str,
    ) -> Result<Option<String>, KnowledgeError> {
        if !fs::try_exists(document_dir).await.unwrap_or(false) {
            tracing::info!(dir = %document_dir.display(), "Document directory missing, creating it");
            fs::create_dir_all(document_dir).await?;
            return Ok(None);
        }

        let documents = self.read_documents(document_dir).await?;
        if documents.is_empty() {
            tracing::info!(dir = %document_dir.display(), "No documents to answer from");
            return Ok(None);
        }
        tracing::info!(documents = documents.len(), "Answering from knowledge documents");

        let index = self.index_for(document_dir, documents).await?;
        if index.is_empty() {
            return Ok(None);
        }

        let query = self.embedder.embed(&[question.to_string()]).await?;
        let Some(query) = query.into_iter().next() else {
            return Ok(None);
        };
        let hits = index.search(&query, self.settings.top_k);

        let response = self.ai_provider.complete(self.answer_request(question, &hits)).await?;
        let answer = response.content.trim().to_string();
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockEmbeddingProvider, MockError};
    use crate::adapters::document::DocumentTextExtractor;
    use tempfile::TempDir;

    struct Fixture {
        kb: DirectoryKnowledgeBase,
        ai: MockAIProvider,
        embedder: MockEmbeddingProvider,
    }

    fn fixture(ai: MockAIProvider, embedder: MockEmbeddingProvider) -> Fixture {
        let settings = KnowledgeSettings {
            extensions: vec!["txt".to_string()],
            chunk_size: 60,
            chunk_overlap: 0,
            top_k: 1,
            ..KnowledgeSettings::default()
        };
        Fixture {
            kb: DirectoryKnowledgeBase::new(
                Arc::new(DocumentTextExtractor::new()),
                Arc::new(embedder.clone()),
                Arc::new(ai.clone()),
                settings,
            ),
            ai,
            embedder,
        }
    }

    #[tokio::test]
    async fn missing_directory_is_created_and_yields_none() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("uploads");
        let f = fixture(MockAIProvider::new(), MockEmbeddingProvider::new());

        assert_eq!(f.kb.answer(&dir, "endereço?").await.unwrap(), None);
        assert!(dir.is_dir());
        assert_eq!(f.ai.call_count(), 0);
    }

    #[tokio::test]
    async fn directory_without_documents_yields_none() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ignored.pdf"), b"x").unwrap();
        let f = fixture(MockAIProvider::new(), MockEmbeddingProvider::new());

        assert_eq!(f.kb.answer(temp.path(), "endereço?").await.unwrap(), None);
        assert_eq!(f.embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn answers_with_best_matching_passage() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("escritorio.txt"),
            "Endereço do escritório: rua das flores, 10",
        )
        .unwrap();
        std::fs::write(
            temp.path().join("doencas.txt"),
            "Diabetes com insulina diaria pode indicar barreira",
        )
        .unwrap();
        let f = fixture(
            MockAIProvider::new().with_response("  Rua das Flores, 10  "),
            MockEmbeddingProvider::new(),
        );

        let answer = f.kb.answer(temp.path(), "endereço escritório rua flores").await.unwrap();

        assert_eq!(answer.as_deref(), Some("Rua das Flores, 10"));
        let calls = f.ai.get_calls();
        assert_eq!(calls.len(), 1);
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains("escritorio.txt"));
        assert!(!prompt.contains("doencas.txt"));
        assert!(prompt.ends_with("Pergunta: endereço escritório rua flores"));
    }

    #[tokio::test]
    async fn index_is_reused_until_documents_change() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.txt"), "primeiro documento").unwrap();
        let f = fixture(MockAIProvider::new(), MockEmbeddingProvider::new());

        f.kb.answer(temp.path(), "q1").await.unwrap();
        f.kb.answer(temp.path(), "q2").await.unwrap();
        // one index build plus one query embedding per call
        assert_eq!(f.embedder.call_count(), 3);

        std::fs::write(temp.path().join("b.txt"), "segundo documento").unwrap();
        f.kb.answer(temp.path(), "q3").await.unwrap();
        assert_eq!(f.embedder.call_count(), 5);
    }

    #[tokio::test]
    async fn embedding_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.txt"), "conteudo").unwrap();
        let f = fixture(MockAIProvider::new(), MockEmbeddingProvider::failing());

        let err = f.kb.answer(temp.path(), "q").await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Embedding(_)));
    }

    #[tokio::test]
    async fn generation_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.txt"), "conteudo").unwrap();
        let f = fixture(
            MockAIProvider::new().with_error(MockError::AuthenticationFailed),
            MockEmbeddingProvider::new(),
        );

        let err = f.kb.answer(temp.path(), "q").await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Generation(_)));
    }
}
