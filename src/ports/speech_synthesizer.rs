//! Speech Synthesizer Port - Text-to-speech for chat replies.

use async_trait::async_trait;
use thiserror::Error;

/// Port for speech synthesis. Failures never fail a chat turn.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes the text and returns encoded audio bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;

    /// File extension of the produced audio, e.g. `mp3`.
    fn file_extension(&self) -> &str;
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech provider error: {0}")]
    Provider(String),

    #[error("speech request failed: {0}")]
    Network(String),

    #[error("audio write failed: {0}")]
    Io(#[from] std::io::Error),
}
