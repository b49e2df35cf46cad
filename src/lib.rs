//! Voicebridge - HTTP relay for browser voice assistants
//!
//! This library relays browser-submitted audio or text to three cloud
//! services and returns the combined result:
//! - Speech-to-text: raw WAV upload to a recognition endpoint
//! - Chat: a fixed assistant instruction plus the user message to a
//!   chat-completion endpoint
//! - Text-to-speech: the chat reply to a synthesis endpoint
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  Browser frontend                    │
//! │   POST /speech-to-text   │   POST /process-message   │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                  Voicebridge                         │
//! │   Orchestration  │  STT / Chat / TTS clients         │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │              Cloud speech & chat APIs                │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod clients;
pub mod config;
pub mod error;

pub use clients::{ChatClient, ChatModel, SpeechToText, Synthesizer, TextToSpeech, Transcriber};
pub use config::Config;
pub use error::{Error, Result};
