//! Relay endpoints: speech upload and the chat + synthesis pipeline

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::ApiState;
use crate::Error;

/// Build relay router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/speech-to-text", post(speech_to_text))
        .route("/process-message", post(process_message))
        // uncompressed WAV clips easily exceed axum's default 2 MB body cap
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

/// Transcription response
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
}

/// Transcribe an uploaded WAV clip
///
/// Expects a multipart form with an `audio` field. "No speech recognized"
/// is a success with an empty transcript.
async fn speech_to_text(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptResponse>, RelayError> {
    let mut audio = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| RelayError::BadRequest("invalid multipart body"))?
    {
        if field.name() == Some("audio") {
            audio = Some(
                field
                    .bytes()
                    .await
                    .map_err(|_| RelayError::BadRequest("could not read audio field"))?,
            );
            break;
        }
    }

    let audio = audio.ok_or(RelayError::BadRequest("missing audio file"))?;
    if audio.is_empty() {
        return Err(RelayError::BadRequest("empty audio data"));
    }

    let stt = state
        .stt
        .as_ref()
        .ok_or(RelayError::NotConfigured("STT not configured"))?;

    let transcript = stt
        .recognize(&audio)
        .await
        .map_err(RelayError::TranscriptionFailed)?;

    Ok(Json(TranscriptResponse {
        transcript: transcript.unwrap_or_default(),
    }))
}

/// Process-message request body
#[derive(Debug, Deserialize)]
pub struct ProcessMessageRequest {
    pub message: Option<String>,
}

/// Process-message response: the reply text plus its synthesized audio
/// (field names kept for the original browser frontend)
#[derive(Debug, Serialize)]
pub struct ProcessMessageResponse {
    #[serde(rename = "openaiResponseText")]
    pub text: String,

    /// Base64 of the exact WAV bytes the synthesis service returned
    #[serde(rename = "openaiResponseSpeech")]
    pub speech: String,
}

/// Generate a chat reply for the message, then synthesize it
///
/// A chat failure short-circuits before any synthesis call; the two
/// failure stages answer with distinct codes.
async fn process_message(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ProcessMessageRequest>,
) -> Result<Json<ProcessMessageResponse>, RelayError> {
    let message = request
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or(RelayError::BadRequest("missing message"))?;

    let chat = state
        .chat
        .as_ref()
        .ok_or(RelayError::NotConfigured("chat not configured"))?;
    let tts = state
        .tts
        .as_ref()
        .ok_or(RelayError::NotConfigured("TTS not configured"))?;

    let reply = chat
        .generate_reply(message)
        .await
        .map_err(RelayError::ChatFailed)?;

    let audio = tts
        .synthesize(&reply)
        .await
        .map_err(RelayError::SynthesisFailed)?;

    let speech = base64::engine::general_purpose::STANDARD.encode(&audio);

    Ok(Json(ProcessMessageResponse {
        text: reply,
        speech,
    }))
}

/// Relay endpoint errors
#[derive(Debug)]
pub enum RelayError {
    NotConfigured(&'static str),
    BadRequest(&'static str),
    TranscriptionFailed(Error),
    ChatFailed(Error),
    SynthesisFailed(Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            code: &'static str,
        }

        let (status, code, message) = match self {
            Self::NotConfigured(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "not_configured", msg.to_string())
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.to_string()),
            Self::TranscriptionFailed(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "transcription_failed",
                e.to_string(),
            ),
            Self::ChatFailed(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "chat_failed",
                e.to_string(),
            ),
            Self::SynthesisFailed(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "synthesis_failed",
                e.to_string(),
            ),
        };

        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}
