use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::config::SpeechConfig;
use crate::speech::error::{ErrorResponse, SpeechError};
use crate::speech::shutdown::ShutdownManager;
use crate::speech::upstream::VoiceClient;

/// How many ports past the configured one `try_bind` will try.
const PORT_FALLBACK_RANGE: u16 = 100;
const AUDIO_CACHE_CONTROL: &str = "public, max-age=31536000";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Deserialize)]
struct TtsRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "voiceId")]
    voice_id: Option<String>,
}

#[derive(Clone)]
struct AppState {
    client: Arc<VoiceClient>,
}

/// Build the proxy routes: `POST /api/tts` and `GET /health`.
pub fn build_router(client: Arc<VoiceClient>) -> Router {
    Router::new()
        .route("/api/tts", post(handle_tts))
        .route("/health", get(handle_health))
        .with_state(AppState { client })
}

pub struct SpeechServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive to prevent port race conditions.
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    client: Arc<VoiceClient>,
    shutdown: Arc<ShutdownManager>,
}

impl SpeechServer {
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Ok(Self::with_client(VoiceClient::from_config(config)?))
    }

    pub fn with_client(client: VoiceClient) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            listener: None,
            client: Arc::new(client),
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Try to bind to `bind_addr`, falling back to incremental ports if busy.
    ///
    /// The listener is kept alive so nothing can claim the port between
    /// try_bind() and run().
    pub async fn try_bind(&mut self, bind_addr: &str) -> Result<SocketAddr, SpeechError> {
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| SpeechError::Bind(format!("Invalid bind address '{bind_addr}': {e}")))?;

        let start_port = bind_addr.port();
        let host = bind_addr.ip();
        let end_port = start_port.saturating_add(PORT_FALLBACK_RANGE);

        for port in start_port..=end_port {
            match TcpListener::bind(SocketAddr::new(host, port)).await {
                Ok(listener) => {
                    let actual_addr = listener
                        .local_addr()
                        .map_err(|e| SpeechError::Bind(e.to_string()))?;
                    self.addr = actual_addr;
                    self.listener = Some(listener);
                    tracing::info!(addr = %actual_addr, "Speech proxy bound");
                    return Ok(actual_addr);
                }
                Err(e) => {
                    tracing::debug!(port, error = %e, "Port busy");
                }
            }
        }

        Err(SpeechError::Bind(format!(
            "Could not find available port in range {start_port}-{end_port}"
        )))
    }

    pub fn handle(&self) -> SpeechHandle {
        SpeechHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Run the proxy until shutdown.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    /// Call try_bind() before run().
    pub async fn run(self) -> Result<(), SpeechError> {
        let listener = self
            .listener
            .ok_or_else(|| SpeechError::Bind("try_bind() must be called before run()".to_string()))?;

        tracing::info!(addr = %self.addr, "Starting speech proxy");

        let app = build_router(self.client.clone());
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::warn!(error = %e, "Signal handler failed");
                }
            })
            .into_future()
            .await
            .map_err(|e| SpeechError::Internal(format!("Server error: {e}")))?;

        tracing::info!("Speech proxy stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct SpeechHandle {
    shutdown: Arc<ShutdownManager>,
}

impl SpeechHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}

async fn handle_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "phonics-garden",
    })
}

async fn handle_tts(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4().to_string();

    match synthesize(&state, &body).await {
        Ok(audio) => {
            tracing::debug!(request_id = %request_id, bytes = audio.len(), "TTS ok");
            (
                StatusCode::OK,
                [
                    (CONTENT_TYPE, "audio/mpeg"),
                    (CACHE_CONTROL, AUDIO_CACHE_CONTROL),
                ],
                audio,
            )
                .into_response()
        }
        Err(e) => {
            if e.status_code().is_server_error() {
                tracing::warn!(request_id = %request_id, error = %e, "TTS request failed");
            } else {
                tracing::debug!(request_id = %request_id, error = %e, "TTS request rejected");
            }
            ErrorResponse::from_error(&e, &request_id)
        }
    }
}

async fn synthesize(state: &AppState, body: &[u8]) -> Result<Bytes, SpeechError> {
    let request: TtsRequest = serde_json::from_slice(body)
        .map_err(|e| SpeechError::InvalidRequest(format!("Malformed JSON: {e}")))?;

    let text = request
        .text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(SpeechError::MissingText)?;

    state
        .client
        .synthesize(text, request.voice_id.as_deref())
        .await
}
