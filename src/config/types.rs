use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::game::DEFAULT_PLAYER_NAME;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cloud: CloudConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// Who is playing on this device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Name used to find or create the remote player profile.
    #[serde(default = "default_player_name")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the default state file location.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
}

/// Remote persistence store (PostgREST-compatible).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Project URL, e.g. "https://xyz.supabase.co". Falls back to `PHONICS_CLOUD_URL`.
    #[serde(default)]
    pub url: Option<String>,
    /// Public anon key. Falls back to `PHONICS_CLOUD_KEY`.
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_cloud_timeout")]
    pub timeout_seconds: u32,
}

/// Speech proxy server and its upstream vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Bind address for `phonics serve` (host:port).
    #[serde(default = "default_speech_bind_addr")]
    pub bind_addr: String,
    /// Proxy base URL used by the narrator.
    #[serde(default = "default_speech_proxy_url")]
    pub proxy_url: String,
    /// Upstream text-to-speech API.
    #[serde(default = "default_speech_upstream_url")]
    pub upstream_url: String,
    /// Vendor API key. Falls back to `ELEVENLABS_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Upstream request timeout in seconds (default: 30).
    #[serde(default = "default_speech_timeout")]
    pub timeout_seconds: u32,
}

/// Prosody and program for the on-device fallback voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_voice_rate")]
    pub rate: f32,
    #[serde(default = "default_voice_pitch")]
    pub pitch: f32,
    #[serde(default = "default_voice_volume")]
    pub volume: f32,
    /// Local TTS program, e.g. "espeak". Unset means no fallback voice.
    #[serde(default)]
    pub fallback_command: Option<String>,
}

fn default_player_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

fn default_cloud_timeout() -> u32 {
    10
}

fn default_speech_bind_addr() -> String {
    "127.0.0.1:3001".to_string()
}

fn default_speech_proxy_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

fn default_speech_upstream_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    "EXAVITQu4vr4xnSDxMaL".to_string()
}

fn default_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_speech_timeout() -> u32 {
    30
}

fn default_voice_rate() -> f32 {
    0.8
}

fn default_voice_pitch() -> f32 {
    1.1
}

fn default_voice_volume() -> f32 {
    1.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_player_name(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_seconds: default_cloud_timeout(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_speech_bind_addr(),
            proxy_url: default_speech_proxy_url(),
            upstream_url: default_speech_upstream_url(),
            api_key: None,
            voice_id: default_voice_id(),
            model_id: default_model_id(),
            timeout_seconds: default_speech_timeout(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            rate: default_voice_rate(),
            pitch: default_voice_pitch(),
            volume: default_voice_volume(),
            fallback_command: None,
        }
    }
}
