//! Speech synthesis configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::speech::VoiceSettings;

/// Audio replies for chat turns.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_voice")]
    pub voice: String,

    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default = "default_instructions")]
    pub instructions: Option<String>,

    /// Directory audio files are written to
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// URL prefix the audio directory is served under
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

impl SpeechConfig {
    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            voice: self.voice.clone(),
            speed: self.speed,
            instructions: self.instructions.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.25..=4.0).contains(&self.speed) {
            return Err(ValidationError::InvalidSpeechSpeed);
        }
        if !self.public_path.starts_with('/') {
            return Err(ValidationError::InvalidPublicPath);
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: default_model(),
            voice: default_voice(),
            speed: default_speed(),
            instructions: default_instructions(),
            audio_dir: default_audio_dir(),
            public_path: default_public_path(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "gpt-4o-mini-tts".to_string()
}

fn default_voice() -> String {
    "nova".to_string()
}

fn default_speed() -> f32 {
    1.0
}

fn default_instructions() -> Option<String> {
    Some(
        "Fale de forma amigável, empática e acolhedora, como uma consultora experiente \
         conversando naturalmente com um cliente."
            .to_string(),
    )
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("public/audio")
}

fn default_public_path() -> String {
    "/audio".to_string()
}
