//! OpenAI Embeddings - Implementation of EmbeddingProvider for `/embeddings`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::OpenAIConfig;
use crate::ports::{EmbeddingError, EmbeddingProvider};

/// Inputs sent per request; larger batches are split.
const MAX_BATCH: usize = 96;

/// OpenAI embeddings client.
pub struct OpenAIEmbeddingProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIEmbeddingProvider {
    /// Creates a provider; `config.model` must name an embedding model.
    pub fn new(config: OpenAIConfig) -> Result<Self, EmbeddingError> {
        let client = config
            .build_client()
            .map_err(|e| EmbeddingError::unavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: batch,
        };

        let response = self
            .client
            .post(self.config.endpoint("embeddings"))
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::unavailable(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(EmbeddingError::AuthenticationFailed);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::unavailable(format!("status {}: {}", status, body)));
        }

        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::invalid_response(e.to_string()))?;

        if parsed.data.len() != batch.len() {
            return Err(EmbeddingError::invalid_response(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                parsed.data.len()
            )));
        }

        parsed.data.sort_by_key(|d| d.index);
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(inputs.len());
        for batch in inputs.chunks(MAX_BATCH) {
            vectors.extend(self.embed_batch(batch).await?);
        }
        Ok(vectors)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_model_and_inputs() {
        let inputs = vec!["a".to_string(), "b".to_string()];
        let body = serde_json::to_value(EmbeddingRequest {
            model: "text-embedding-3-small",
            input: &inputs,
        })
        .unwrap();
        assert_eq!(body["model"], "text-embedding-3-small");
        assert_eq!(body["input"][1], "b");
    }

    #[test]
    fn response_parses_out_of_order_data() {
        let json = r#"{"data":[{"index":1,"embedding":[0.5]},{"index":0,"embedding":[0.25]}]}"#;
        let mut parsed: EmbeddingResponse = serde_json::from_str(json).unwrap();
        parsed.data.sort_by_key(|d| d.index);
        assert_eq!(parsed.data[0].embedding, vec![0.25]);
    }

    #[test]
    fn provider_reports_model() {
        let provider =
            OpenAIEmbeddingProvider::new(OpenAIConfig::new("k").with_model("text-embedding-3-small"))
                .unwrap();
        assert_eq!(provider.model(), "text-embedding-3-small");
    }
}
