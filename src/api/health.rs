//! Health check endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use super::ApiState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed readiness response
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: ReadinessChecks,
}

/// Per-capability readiness checks
#[derive(Serialize)]
pub struct ReadinessChecks {
    pub stt: CheckResult,
    pub chat: CheckResult,
    pub tts: CheckResult,
}

/// Result of a single capability check
#[derive(Serialize)]
pub struct CheckResult {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    const fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }

    fn unavailable() -> Self {
        Self {
            status: "unavailable",
            message: Some("not configured".to_string()),
        }
    }

    fn check(configured: bool) -> Self {
        if configured {
            Self::ok()
        } else {
            Self::unavailable()
        }
    }
}

/// Liveness probe - is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe - which capabilities can serve requests?
///
/// Degrades the HTTP status only when no capability is configured at all;
/// a partially configured process can still serve its remaining endpoints.
async fn ready(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<ReadinessResponse>) {
    let stt = CheckResult::check(state.stt.is_some());
    let chat = CheckResult::check(state.chat.is_some());
    let tts = CheckResult::check(state.tts.is_some());

    let all_ok = stt.status == "ok" && chat.status == "ok" && tts.status == "ok";
    let any_ok = stt.status == "ok" || chat.status == "ok" || tts.status == "ok";

    let status = if all_ok { "ok" } else { "degraded" };
    let http_status = if any_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(ReadinessResponse {
            status,
            checks: ReadinessChecks { stt, chat, tts },
        }),
    )
}

/// Build health router (liveness only, no state needed)
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Build readiness router (needs state for capability checks)
pub fn ready_router(state: Arc<ApiState>) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
