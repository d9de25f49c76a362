//! Knowledge base configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::knowledge::KnowledgeSettings;

/// Document directory and retrieval tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// Directory holding uploaded documents
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// Recognized extensions (comma-separated)
    #[serde(default = "default_extensions")]
    pub extensions: String,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Reuse the index while the document set is unchanged
    #[serde(default = "default_cache_index")]
    pub cache_index: bool,

    /// Bound on one knowledge lookup, in seconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,
}

impl KnowledgeConfig {
    /// Extensions lower-cased without the leading dot.
    pub fn extensions_list(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn settings(&self) -> KnowledgeSettings {
        KnowledgeSettings {
            extensions: self.extensions_list(),
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            top_k: self.top_k,
            cache_index: self.cache_index,
            ..KnowledgeSettings::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.extensions_list().is_empty() {
            return Err(ValidationError::NoDocumentExtensions);
        }
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size || self.top_k == 0 {
            return Err(ValidationError::InvalidChunking);
        }
        if self.lookup_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            extensions: default_extensions(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
            cache_index: default_cache_index(),
            lookup_timeout_secs: default_lookup_timeout(),
        }
    }
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_extensions() -> String {
    "pdf".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_top_k() -> usize {
    4
}

fn default_cache_index() -> bool {
    true
}

fn default_lookup_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_list_is_normalized() {
        let config = KnowledgeConfig {
            extensions: "PDF, .txt,,md".to_string(),
            ..Default::default()
        };
        assert_eq!(config.extensions_list(), vec!["pdf", "txt", "md"]);
    }

    #[test]
    fn test_settings_follow_config() {
        let config = KnowledgeConfig {
            chunk_size: 500,
            chunk_overlap: 50,
            cache_index: false,
            ..Default::default()
        };
        let settings = config.settings();
        assert_eq!(settings.chunk_size, 500);
        assert_eq!(settings.chunk_overlap, 50);
        assert!(!settings.cache_index);
        assert_eq!(settings.extensions, vec!["pdf"]);
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk() {
        let config = KnowledgeConfig {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidChunking));
    }

    #[test]
    fn test_empty_extensions_fail() {
        let config = KnowledgeConfig {
            extensions: " , ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::NoDocumentExtensions));
    }
}
