//! Clients for the external speech and chat services
//!
//! Each client is one blocking-style HTTP call behind a trait seam so the
//! orchestration layer (and tests) can inject alternatives.

mod chat;
mod stt;
mod tts;

pub use chat::ChatClient;
pub use stt::SpeechToText;
pub use tts::TextToSpeech;

use async_trait::async_trait;

use crate::Result;

/// Converts spoken audio to text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe WAV audio bytes
    ///
    /// `Ok(None)` means the service answered successfully but recognized no
    /// speech — distinct from any failure.
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request or is unreachable
    async fn recognize(&self, audio: &[u8]) -> Result<Option<String>>;
}

/// Generates a chat reply for a user message
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one user message (plus the fixed system instruction) and return
    /// the generated reply text
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request or is unreachable
    async fn generate_reply(&self, message: &str) -> Result<String>;
}

/// Synthesizes speech audio from text
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize WAV audio for the given text
    ///
    /// # Errors
    ///
    /// Returns error if the service rejects the request or is unreachable
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
