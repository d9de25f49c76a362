//! Writes synthesized replies into the public audio directory.

use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

use crate::domain::foundation::SessionId;
use crate::domain::orchestration::sanitize;
use crate::ports::{SpeechError, SpeechSynthesizer};

/// Turns a reply into an audio file and returns its public URL.
#[derive(Clone)]
pub struct AudioPublisher {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    audio_dir: PathBuf,
    public_path: String,
}

impl AudioPublisher {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        audio_dir: impl Into<PathBuf>,
        public_path: impl Into<String>,
    ) -> Self {
        Self {
            synthesizer,
            audio_dir: audio_dir.into(),
            public_path: public_path.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn audio_dir(&self) -> &std::path::Path {
        &self.audio_dir
    }

    pub fn public_path(&self) -> &str {
        &self.public_path
    }

    /// Maps everything outside `[A-Za-z0-9-]` to `_` so the id is safe both
    /// as a file name and inside the public URL.
    fn url_safe(session_id: &str) -> String {
        session_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    }

    /// Synthesizes the reply with mention spans stripped.
    ///
    /// Returns `Ok(None)` when nothing speakable remains.
    pub async fn publish(
        &self,
        session_id: &SessionId,
        reply: &str,
    ) -> Result<Option<String>, SpeechError> {
        let text = sanitize(reply);
        if text.is_empty() {
            return Ok(None);
        }

        let audio = self.synthesizer.synthesize(&text).await?;

        fs::create_dir_all(&self.audio_dir).await?;
        let file_name = format!(
            "response-{}-{}.{}",
            Self::url_safe(session_id.as_str()),
            Utc::now().timestamp_millis(),
            self.synthesizer.file_extension()
        );
        fs::write(self.audio_dir.join(&file_name), audio).await?;

        let url = format!("{}/{}", self.public_path, file_name);
        tracing::debug!(session_id = %session_id, url = %url, "Audio reply written");
        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSynth {
        texts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynth {
        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
            if self.fail {
                return Err(SpeechError::Provider("down".to_string()));
            }
            self.texts.lock().unwrap().push(text.to_string());
            Ok(vec![1, 2, 3])
        }

        fn file_extension(&self) -> &str {
            "mp3"
        }
    }

    #[tokio::test]
    async fn publish_writes_file_and_returns_public_url() {
        let temp = TempDir::new().unwrap();
        let synth = Arc::new(RecordingSynth::default());
        let publisher = AudioPublisher::new(synth.clone(), temp.path().join("audio"), "/audio/");
        let session = SessionId::new("session-1").unwrap();

        let url = publisher
            .publish(&session, "Olá! @[Inicio](inicio-fluxo-001)")
            .await
            .unwrap()
            .unwrap();

        assert!(url.starts_with("/audio/response-session-1-"));
        assert!(url.ends_with(".mp3"));
        assert_eq!(synth.texts.lock().unwrap().as_slice(), ["Olá!"]);
        let file = temp.path().join("audio").join(url.trim_start_matches("/audio/"));
        assert_eq!(std::fs::read(file).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn session_id_is_made_url_safe() {
        let temp = TempDir::new().unwrap();
        let synth = Arc::new(RecordingSynth::default());
        let publisher = AudioPublisher::new(synth, temp.path(), "/audio");
        let session = SessionId::new("a b#c?d/e").unwrap();

        let url = publisher.publish(&session, "Olá").await.unwrap().unwrap();

        assert!(url.starts_with("/audio/response-a_b_c_d_e-"));
        assert!(temp.path().join(url.trim_start_matches("/audio/")).exists());
    }

    #[tokio::test]
    async fn mention_only_reply_has_no_audio() {
        let temp = TempDir::new().unwrap();
        let synth = Arc::new(RecordingSynth::default());
        let publisher = AudioPublisher::new(synth.clone(), temp.path(), "/audio");

        let url = publisher
            .publish(&SessionId::generate(), "@[Inicio](x)")
            .await
            .unwrap();

        assert_eq!(url, None);
        assert!(synth.texts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn synthesis_failure_is_returned() {
        let temp = TempDir::new().unwrap();
        let synth = Arc::new(RecordingSynth {
            fail: true,
            ..RecordingSynth::default()
        });
        let publisher = AudioPublisher::new(synth, temp.path(), "/audio");

        assert!(publisher.publish(&SessionId::generate(), "Olá").await.is_err());
    }
}
