//! Speech adapters - text-to-speech and audio file publishing.

mod audio_publisher;
mod openai_speech;

pub use audio_publisher::AudioPublisher;
pub use openai_speech::{OpenAISpeechSynthesizer, VoiceSettings};
