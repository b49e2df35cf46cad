//! Speech-to-text client

use async_trait::async_trait;

use super::Transcriber;
use crate::{Error, Result};

/// Recognition model sent with every request
const RECOGNITION_MODEL: &str = "en-US_Multimedia";

/// Response from the recognition API
#[derive(serde::Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(serde::Deserialize)]
struct RecognitionResult {
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(serde::Deserialize)]
struct RecognitionAlternative {
    transcript: String,
}

/// Transcribes WAV audio via the cloud recognition API
///
/// The service expects the raw audio as the request body with the API key
/// passed verbatim as a Basic credential.
pub struct SpeechToText {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SpeechToText {
    /// Create a new STT client
    ///
    /// # Errors
    ///
    /// Returns error if the API key or base URL is empty
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        if api_key.is_empty() || base_url.is_empty() {
            return Err(Error::Config(
                "STT API key and base URL required".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl Transcriber for SpeechToText {
    async fn recognize(&self, audio: &[u8]) -> Result<Option<String>> {
        tracing::debug!(audio_bytes = audio.len(), "starting transcription");

        let url = format!("{}/v1/recognize", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .query(&[("model", RECOGNITION_MODEL)])
            .header("Authorization", format!("Basic {}", self.api_key))
            .header("Content-Type", "audio/wav")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "STT request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "STT API error");
            return Err(Error::Upstream {
                service: "stt",
                status,
                body,
            });
        }

        let result: RecognizeResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse STT response");
            e
        })?;

        let transcript = result
            .results
            .first()
            .and_then(|r| r.alternatives.first())
            .map(|a| a.transcript.clone());

        match &transcript {
            Some(text) => tracing::info!(transcript = %text, "transcription complete"),
            None => tracing::info!("no speech recognized"),
        }

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_credentials() {
        assert!(SpeechToText::new(String::new(), "https://stt.example".to_string()).is_err());
        assert!(SpeechToText::new("key".to_string(), String::new()).is_err());
        assert!(SpeechToText::new("key".to_string(), "https://stt.example".to_string()).is_ok());
    }

    #[test]
    fn parses_first_alternative() {
        let json = r#"{"results":[{"alternatives":[{"transcript":"hello there"},{"transcript":"hallo"}]},{"alternatives":[{"transcript":"second"}]}]}"#;
        let parsed: RecognizeResponse = serde_json::from_str(json).unwrap();
        let transcript = parsed
            .results
            .first()
            .and_then(|r| r.alternatives.first())
            .map(|a| a.transcript.clone());
        assert_eq!(transcript.as_deref(), Some("hello there"));
    }

    #[test]
    fn missing_results_means_no_speech() {
        let parsed: RecognizeResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());
    }
}
