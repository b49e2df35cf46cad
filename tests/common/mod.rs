//! Shared test utilities: stub clients and state builders

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use voicebridge::api::ApiState;
use voicebridge::{ChatModel, Error, Result, Synthesizer, Transcriber};

/// Transcriber that always returns the same outcome
pub struct FixedTranscriber(pub Option<String>);

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn recognize(&self, _audio: &[u8]) -> Result<Option<String>> {
        Ok(self.0.clone())
    }
}

/// Transcriber that always fails upstream
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn recognize(&self, _audio: &[u8]) -> Result<Option<String>> {
        Err(Error::Upstream {
            service: "stt",
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        })
    }
}

/// Chat model that always returns the same reply
pub struct FixedChat(pub String);

#[async_trait]
impl ChatModel for FixedChat {
    async fn generate_reply(&self, _message: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Chat model that always fails upstream
pub struct FailingChat;

#[async_trait]
impl ChatModel for FailingChat {
    async fn generate_reply(&self, _message: &str) -> Result<String> {
        Err(Error::Upstream {
            service: "chat",
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: "rate limited".to_string(),
        })
    }
}

/// Synthesizer returning fixed bytes and counting its invocations
pub struct CountingSynthesizer {
    pub audio: Vec<u8>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Synthesizer for CountingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.audio.clone())
    }
}

/// Synthesizer that always fails upstream
pub struct FailingSynthesizer;

#[async_trait]
impl Synthesizer for FailingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Err(Error::Upstream {
            service: "tts",
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "synthesis unavailable".to_string(),
        })
    }
}

/// Build state from optional stub clients
#[must_use]
pub fn stub_state(
    stt: Option<Arc<dyn Transcriber>>,
    chat: Option<Arc<dyn ChatModel>>,
    tts: Option<Arc<dyn Synthesizer>>,
) -> Arc<ApiState> {
    Arc::new(ApiState { stt, chat, tts })
}
