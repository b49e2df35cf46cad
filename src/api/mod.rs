//! HTTP API server for voicebridge

pub mod health;
pub mod relay;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::clients::{ChatClient, ChatModel, SpeechToText, Synthesizer, TextToSpeech, Transcriber};
use crate::{Config, Result};

/// Shared state for API handlers
///
/// Each client is present only when its credentials were configured; a
/// missing client degrades the matching endpoint to `not_configured`.
#[derive(Clone)]
pub struct ApiState {
    pub stt: Option<Arc<dyn Transcriber>>,
    pub chat: Option<Arc<dyn ChatModel>>,
    pub tts: Option<Arc<dyn Synthesizer>>,
}

impl ApiState {
    /// Build state from configuration, constructing only the clients whose
    /// credentials are present
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            stt: build_stt(config),
            chat: build_chat(config),
            tts: build_tts(config),
        }
    }
}

fn build_stt(config: &Config) -> Option<Arc<dyn Transcriber>> {
    let (Some(key), Some(url)) = (&config.stt.api_key, &config.stt.base_url) else {
        tracing::warn!("STT credentials missing, /speech-to-text degraded");
        return None;
    };

    match SpeechToText::new(key.clone(), url.clone()) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "STT client unavailable");
            None
        }
    }
}

fn build_chat(config: &Config) -> Option<Arc<dyn ChatModel>> {
    let Some(key) = &config.chat.api_key else {
        tracing::warn!("chat API key missing, /process-message degraded");
        return None;
    };

    match ChatClient::new(key.clone(), &config.chat) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "chat client unavailable");
            None
        }
    }
}

fn build_tts(config: &Config) -> Option<Arc<dyn Synthesizer>> {
    let (Some(key), Some(url)) = (&config.tts.api_key, &config.tts.base_url) else {
        tracing::warn!("TTS credentials missing, /process-message degraded");
        return None;
    };

    match TextToSpeech::new(key.clone(), url.clone(), config.tts.voice.clone()) {
        Ok(client) => {
            let client = if let Some(dir) = &config.capture_dir {
                client.with_capture_dir(dir.clone())
            } else {
                client
            };
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "TTS client unavailable");
            None
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
    static_dir: Option<PathBuf>,
}

impl ApiServer {
    /// Create a new API server
    #[must_use]
    pub fn new(state: ApiState, port: u16, static_dir: Option<PathBuf>) -> Self {
        Self {
            state: Arc::new(state),
            port,
            static_dir,
        }
    }

    /// Build the router with all routes
    fn router(&self) -> Router {
        let mut router = Router::new()
            .merge(relay::router(self.state.clone()))
            .merge(health::router())
            .merge(health::ready_router(self.state.clone()));

        // Serve the frontend page if configured
        if let Some(static_dir) = &self.static_dir {
            let index_file = static_dir.join("index.html");
            let serve_dir = ServeDir::new(static_dir).not_found_service(ServeFile::new(&index_file));

            router = router.fallback_service(serve_dir);
            tracing::info!(path = %static_dir.display(), "serving static files");
        }

        // CORS layer for cross-origin requests from the frontend
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or serve
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
