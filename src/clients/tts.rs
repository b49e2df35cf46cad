//! Text-to-speech client

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;

use super::Synthesizer;
use crate::{Error, Result};

/// Synthesizes WAV audio via the cloud synthesis API
///
/// The service authenticates with a Basic credential built from the fixed
/// `apikey` username and the configured key.
pub struct TextToSpeech {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    voice: String,
    capture_dir: Option<PathBuf>,
}

impl TextToSpeech {
    /// Create a new TTS client
    ///
    /// # Errors
    ///
    /// Returns error if the API key or base URL is empty
    pub fn new(api_key: String, base_url: String, voice: String) -> Result<Self> {
        if api_key.is_empty() || base_url.is_empty() {
            return Err(Error::Config(
                "TTS API key and base URL required".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            voice,
            capture_dir: None,
        })
    }

    /// Capture every synthesis result to a uniquely named WAV file in `dir`
    #[must_use]
    pub fn with_capture_dir(mut self, dir: PathBuf) -> Self {
        self.capture_dir = Some(dir);
        self
    }

    /// Basic credential: base64 of `apikey:{key}`
    fn basic_credential(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(format!("apikey:{}", self.api_key))
    }

    /// Write the synthesized audio to `{dir}/{uuid}.wav`
    ///
    /// Capture is best-effort: failures are logged, never returned.
    fn capture(dir: &Path, audio: &[u8]) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!(path = %dir.display(), error = %e, "failed to create capture directory");
            return;
        }

        let path = dir.join(format!("{}.wav", uuid::Uuid::new_v4()));
        match std::fs::write(&path, audio) {
            Ok(()) => tracing::debug!(path = %path.display(), "synthesis captured"),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to write capture file");
            }
        }
    }
}

#[async_trait]
impl Synthesizer for TextToSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct SynthesizeRequest<'a> {
            text: &'a str,
            voice: &'a str,
            accept: &'a str,
        }

        tracing::debug!(text_chars = text.len(), voice = %self.voice, "starting synthesis");

        let request = SynthesizeRequest {
            text,
            voice: &self.voice,
            accept: "audio/wav",
        };

        let url = format!("{}/v1/synthesize", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Basic {}", self.basic_credential()))
            .header("Accept", "audio/wav")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "TTS request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "TTS API error");
            return Err(Error::Upstream {
                service: "tts",
                status,
                body,
            });
        }

        let audio = response.bytes().await?.to_vec();
        tracing::info!(audio_bytes = audio.len(), "synthesis complete");

        if let Some(dir) = &self.capture_dir {
            Self::capture(dir, &audio);
        }

        Ok(audio)
    }
}
