//! Local Document Store - Implementation of DocumentStore over one directory.
//!
//! Uploads are stored as `{millis}-{sanitized name}` so listings can recover
//! the original name and upload order from the file name alone.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    DocumentInfo, DocumentStore, DocumentStoreError, ExtractionError, StoredDocument,
    TextExtractor,
};

/// Local filesystem store for knowledge documents.
#[derive(Clone)]
pub struct LocalDocumentStore {
    dir: PathBuf,
    extensions: Vec<String>,
    max_bytes: u64,
    extractor: Arc<dyn TextExtractor>,
}

impl LocalDocumentStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        extensions: Vec<String>,
        max_bytes: u64,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_bytes,
            extractor,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Replaces every character outside `[a-zA-Z0-9.-]` with `_`.
    pub fn sanitize_file_name(name: &str) -> String {
        name.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Splits `{millis}-{name}` into its parts. Names without the prefix
    /// are returned unchanged.
    pub fn split_stored_name(stored: &str) -> (Option<i64>, &str) {
        if let Some((prefix, rest)) = stored.split_once('-') {
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) {
                return (prefix.parse().ok(), rest);
            }
        }
        (None, stored)
    }

    fn extension_of(name: &str) -> Option<String> {
        Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    fn is_recognized(&self, name: &str) -> bool {
        Self::extension_of(name)
            .map(|ext| self.extensions.iter().any(|e| *e == ext))
            .unwrap_or(false)
    }

    fn uploaded_at(prefix_millis: Option<i64>, modified: Option<std::time::SystemTime>) -> Timestamp {
        if let Some(dt) = prefix_millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
            return Timestamp::from_datetime(dt);
        }
        match modified {
            Some(time) => Timestamp::from_datetime(DateTime::<Utc>::from(time)),
            None => Timestamp::now(),
        }
    }

    async fn write_atomically(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn list(&self) -> Result<Vec<DocumentInfo>, DocumentStoreError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let stored_name = entry.file_name().to_string_lossy().into_owned();
            if !self.is_recognized(&stored_name) {
                continue;
            }
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }

            let (prefix, original) = Self::split_stored_name(&stored_name);
            documents.push(DocumentInfo {
                name: original.to_string(),
                stored_name: stored_name.clone(),
                size: meta.len(),
                uploaded_at: Self::uploaded_at(prefix, meta.modified().ok()),
            });
        }

        documents.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.stored_name.cmp(&b.stored_name))
        });
        Ok(documents)
    }

    async fn store(
        &self,
        bytes: Vec<u8>,
        original_name: &str,
    ) -> Result<StoredDocument, DocumentStoreError> {
        let size = bytes.len() as u64;
        if size == 0 {
            return Err(DocumentStoreError::Empty);
        }
        if size > self.max_bytes {
            return Err(DocumentStoreError::TooLarge {
                size,
                max: self.max_bytes,
            });
        }

        let extension = Self::extension_of(original_name).unwrap_or_default();
        if !self.is_recognized(original_name) || !self.extractor.supports(&extension) {
            return Err(ExtractionError::Unsupported(extension).into());
        }

        let extractor = Arc::clone(&self.extractor);
        let (bytes, extracted) = tokio::task::spawn_blocking(move || {
            let extracted = extractor.extract(&bytes, &extension);
            (bytes, extracted)
        })
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let extracted = extracted?;

        if extracted.is_blank() {
            return Err(DocumentStoreError::NoText(original_name.to_string()));
        }

        fs::create_dir_all(&self.dir).await?;
        let stored_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            Self::sanitize_file_name(original_name)
        );
        self.write_atomically(&self.dir.join(&stored_name), &bytes)
            .await?;

        tracing::info!(
            stored_name = %stored_name,
            size = size,
            pages = extracted.page_count,
            "Document stored"
        );

        Ok(StoredDocument {
            stored_name,
            original_name: original_name.to_string(),
            size,
            extracted_text: extracted.text,
            page_count: extracted.page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::DocumentTextExtractor;
    use tempfile::TempDir;

    fn store(dir: &Path, extensions: &[&str]) -> LocalDocumentStore {
        LocalDocumentStore::new(
            dir,
            extensions.iter().map(|e| e.to_string()).collect(),
            1024,
            Arc::new(DocumentTextExtractor::new()),
        )
    }

    #[test]
    fn sanitize_file_name_replaces_disallowed_characters() {
        assert_eq!(
            LocalDocumentStore::sanitize_file_name("Lista de doenças (2024).pdf"),
            "Lista_de_doen_as__2024_.pdf"
        );
    }

    #[test]
    fn split_stored_name_strips_millis_prefix() {
        assert_eq!(
            LocalDocumentStore::split_stored_name("1712345678901-regras.pdf"),
            (Some(1712345678901), "regras.pdf")
        );
        assert_eq!(
            LocalDocumentStore::split_stored_name("sem-prefixo.pdf"),
            (None, "sem-prefixo.pdf")
        );
    }

    #[tokio::test]
    async fn list_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let docs = store(&temp.path().join("absent"), &["pdf"]).list().await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn list_filters_extensions_and_sorts_newest_first() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("1000-old.pdf"), b"a").unwrap();
        std::fs::write(temp.path().join("3000-new.PDF"), b"abc").unwrap();
        std::fs::write(temp.path().join("2000-notes.txt"), b"ignored").unwrap();

        let docs = store(temp.path(), &["pdf"]).list().await.unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["new.PDF", "old.pdf"]);
        assert_eq!(docs[0].size, 3);
        assert_eq!(docs[0].uploaded_at.as_unix_millis(), 3000);
    }

    #[tokio::test]
    async fn store_writes_prefixed_file_and_returns_text() {
        let temp = TempDir::new().unwrap();
        let store = store(temp.path(), &["txt"]);

        let stored = store
            .store(b"Doencas: cegueira".to_vec(), "minha lista.txt")
            .await
            .unwrap();

        assert!(stored.stored_name.ends_with("-minha_lista.txt"));
        assert_eq!(stored.extracted_text, "Doencas: cegueira");
        assert_eq!(stored.size, 17);
        assert!(temp.path().join(&stored.stored_name).exists());

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "minha_lista.txt");
    }

    #[tokio::test]
    async fn store_rejects_oversized_upload() {
        let temp = TempDir::new().unwrap();
        let err = store(temp.path(), &["txt"])
            .store(vec![b'a'; 2048], "big.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::TooLarge { size: 2048, max: 1024 }));
    }

    #[tokio::test]
    async fn store_rejects_blank_text_without_writing() {
        let temp = TempDir::new().unwrap();
        let err = store(temp.path(), &["txt"])
            .store(b"   \n ".to_vec(), "blank.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::NoText(_)));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn store_rejects_unrecognized_extension() {
        let temp = TempDir::new().unwrap();
        let err = store(temp.path(), &["pdf"])
            .store(b"hello".to_vec(), "notes.txt")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DocumentStoreError::Extraction(ExtractionError::Unsupported(_))
        ));
    }
}
