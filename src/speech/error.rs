//! Error types and response handling for the speech proxy.
//!
//! Provides HTTP status code mapping and JSON error response generation.

use std::path::PathBuf;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors from the speech proxy, its upstream, or local playback.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Body was not the expected JSON
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Text is required")]
    MissingText,

    /// No vendor API key in config or environment
    #[error("API key not configured")]
    NotConfigured,

    /// Upstream answered with a non-2xx status
    #[error("Upstream TTS error: {status}")]
    Upstream { status: u16 },

    #[error("Connection to speech service failed: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    #[error("Speech request timed out after {duration}s")]
    Timeout { duration: u64 },

    #[error("Invalid speech service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Could not bind speech server: {0}")]
    Bind(String),

    #[error("Playback failed: {0}")]
    Playback(String),

    #[error("Failed to write audio to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpeechError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            SpeechError::InvalidRequest(_) | SpeechError::MissingText => StatusCode::BAD_REQUEST,
            SpeechError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            SpeechError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            SpeechError::Connection { .. } => StatusCode::BAD_GATEWAY,
            SpeechError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            SpeechError::InvalidUrl { .. }
            | SpeechError::Bind(_)
            | SpeechError::Playback(_)
            | SpeechError::Io { .. }
            | SpeechError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            SpeechError::InvalidRequest(_) => "invalid_request",
            SpeechError::MissingText => "missing_text",
            SpeechError::NotConfigured => "not_configured",
            SpeechError::Upstream { .. } => "upstream_error",
            SpeechError::Connection { .. } => "connection_error",
            SpeechError::Timeout { .. } => "request_timeout",
            SpeechError::InvalidUrl { .. } => "invalid_url",
            SpeechError::Bind(_) => "bind_error",
            SpeechError::Playback(_) => "playback_error",
            SpeechError::Io { .. } => "io_error",
            SpeechError::Internal(_) => "internal_error",
        }
    }
}

/// Builder for standardized error responses
pub struct ErrorResponse;

impl ErrorResponse {
    /// `{"error": <message>, "type": <error_type>, "request_id": <id>}`
    pub fn from_error(err: &SpeechError, request_id: &str) -> Response {
        let body = serde_json::json!({
            "error": err.to_string(),
            "type": err.error_type(),
            "request_id": request_id
        });

        (
            err.status_code(),
            [(CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_status_code() {
        let err = SpeechError::MissingText;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Text is required");
    }

    #[test]
    fn test_upstream_status_is_mirrored() {
        let err = SpeechError::Upstream { status: 401 };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Upstream TTS error: 401");
    }

    #[test]
    fn test_timeout_status_code() {
        let err = SpeechError::Timeout { duration: 30 };
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.error_type(), "request_timeout");
    }

    #[test]
    fn test_error_response_format() {
        let response = ErrorResponse::from_error(&SpeechError::NotConfigured, "test-id-123");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }
}
