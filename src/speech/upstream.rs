use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, Url};
use serde::Serialize;
use tokio::time::timeout;

use crate::config::{SecureString, SpeechConfig};
use crate::speech::error::SpeechError;

/// Voice settings sent with every synthesis request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.5,
            use_speaker_boost: true,
        }
    }
}

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// Client for the vendor text-to-speech API.
pub struct VoiceClient {
    client: Client,
    base: Url,
    api_key: Option<SecureString>,
    voice_id: String,
    model_id: String,
    request_timeout: Duration,
}

impl VoiceClient {
    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let api_key = config.resolve_api_key().secret().cloned();
        if api_key.is_none() {
            tracing::warn!("No speech API key configured; /api/tts will answer 500");
        }
        Self::new(
            &config.upstream_url,
            api_key,
            &config.voice_id,
            &config.model_id,
            Duration::from_secs(u64::from(config.timeout_seconds)),
        )
    }

    pub fn new(
        upstream_url: &str,
        api_key: Option<SecureString>,
        voice_id: &str,
        model_id: &str,
        request_timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let base = Url::parse(upstream_url).map_err(|e| SpeechError::InvalidUrl {
            url: upstream_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(SpeechError::InvalidUrl {
                url: upstream_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .build()
            .map_err(|e| SpeechError::Internal(format!("Failed to build upstream client: {e}")))?;

        Ok(Self {
            client,
            base,
            api_key,
            voice_id: voice_id.to_string(),
            model_id: model_id.to_string(),
            request_timeout,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Synthesize `text` and return the MP3 bytes.
    ///
    /// `voice_id` overrides the configured voice when non-empty.
    pub async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Bytes, SpeechError> {
        let api_key = self.api_key.as_ref().ok_or(SpeechError::NotConfigured)?;
        let voice = voice_id
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.voice_id);

        let result = timeout(self.request_timeout, self.do_synthesize(api_key, text, voice)).await;

        match result {
            Ok(response) => response,
            Err(_) => Err(SpeechError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn do_synthesize(
        &self,
        api_key: &SecureString,
        text: &str,
        voice: &str,
    ) -> Result<Bytes, SpeechError> {
        let url = self.voice_url(voice);
        let body = SynthesisRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .client
            .post(url)
            .header("xi-api-key", api_key.expose())
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::Connection { source: e })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), detail = %detail, "Upstream TTS error");
            return Err(SpeechError::Upstream {
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| SpeechError::Internal(format!("Failed to read audio body: {e}")))
    }

    fn voice_url(&self, voice: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "text-to-speech", voice]);
        }
        url
    }
}
