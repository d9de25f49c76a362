//! Resource probe adapters.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;

use crate::ports::ResourceProbe;

/// Checks the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsResourceProbe;

impl FsResourceProbe {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceProbe for FsResourceProbe {
    async fn exists(&self, input: &str) -> bool {
        let candidate = input.trim();
        if candidate.is_empty() || candidate.contains('\n') {
            return false;
        }
        tokio::fs::try_exists(Path::new(candidate))
            .await
            .unwrap_or(false)
    }
}

/// Fixed set of existing paths, for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticResourceProbe {
    existing: HashSet<String>,
}

impl StaticResourceProbe {
    pub fn new<I, S>(existing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            existing: existing.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ResourceProbe for StaticResourceProbe {
    async fn exists(&self, input: &str) -> bool {
        self.existing.contains(input.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn fs_probe_detects_existing_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().into_owned();
        assert!(FsResourceProbe::new().exists(&path).await);
    }

    #[tokio::test]
    async fn fs_probe_rejects_plain_text() {
        let probe = FsResourceProbe::new();
        assert!(!probe.exists("Olá, tudo bem?").await);
        assert!(!probe.exists("").await);
        assert!(!probe.exists("/definitely/not/here.png").await);
    }

    #[tokio::test]
    async fn static_probe_matches_listed_inputs() {
        let probe = StaticResourceProbe::new(["/tmp/receita.png"]);
        assert!(probe.exists("/tmp/receita.png").await);
        assert!(!probe.exists("/tmp/other.png").await);
    }
}
