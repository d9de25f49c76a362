//! Resource Probe Port - Checks whether an input names a local resource.

use async_trait::async_trait;

/// Port used by the classifier's first routing rule.
#[async_trait]
pub trait ResourceProbe: Send + Sync {
    /// True when the input is the path of an existing local file or directory.
    async fn exists(&self, input: &str) -> bool;
}
