//! OpenAI Speech - Implementation of SpeechSynthesizer for `/audio/speech`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::adapters::ai::OpenAIConfig;
use crate::ports::{SpeechError, SpeechSynthesizer};

/// Voice settings for synthesized replies.
#[derive(Debug, Clone)]
pub struct VoiceSettings {
    pub voice: String,
    pub speed: f32,
    pub instructions: Option<String>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: "nova".to_string(),
            speed: 1.0,
            instructions: None,
        }
    }
}

/// OpenAI text-to-speech client producing MP3 audio.
pub struct OpenAISpeechSynthesizer {
    config: OpenAIConfig,
    voice: VoiceSettings,
    client: Client,
}

impl OpenAISpeechSynthesizer {
    /// Creates a synthesizer; `config.model` must name a speech model.
    pub fn new(config: OpenAIConfig, voice: VoiceSettings) -> Result<Self, SpeechError> {
        let client = config
            .build_client()
            .map_err(|e| SpeechError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            config,
            voice,
            client,
        })
    }

    fn request_body<'a>(&'a self, text: &'a str) -> SpeechRequest<'a> {
        SpeechRequest {
            model: &self.config.model,
            voice: &self.voice.voice,
            input: text,
            speed: self.voice.speed,
            instructions: self.voice.instructions.as_deref(),
            response_format: "mp3",
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .post(self.config.endpoint("audio/speech"))
            .bearer_auth(self.config.api_key())
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Provider(format!("status {}: {}", status, body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn file_extension(&self) -> &str {
        "mp3"
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    speed: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
    response_format: &'a str,
}
