//! Error types for voicebridge

use thiserror::Error;

/// Result type alias for voicebridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while relaying a request
///
/// Each external-call failure carries its kind explicitly so the HTTP layer
/// can tell a missing credential apart from an upstream rejection or a
/// network failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential or base URL for a capability is missing
    #[error("configuration error: {0}")]
    Config(String),

    /// Non-2xx response from an external service
    #[error("{service} error {status}: {body}")]
    Upstream {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// Successful status but a body missing the expected content
    #[error("{service} returned an unexpected response: {detail}")]
    UnexpectedResponse {
        service: &'static str,
        detail: &'static str,
    },

    /// Network-level failure talking to an external service
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
