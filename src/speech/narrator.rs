//! Narration for the game screens.
//!
//! A [`Narrator`] asks a remote [`SpeechSource`] for audio and plays it on an
//! [`AudioSink`]. When either step fails it falls back to an on-device
//! [`LocalVoice`]. Only one narration is current at a time: starting a new
//! one stops the old one, and audio that arrives for a superseded request is
//! dropped.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Client, Url};
use serde::Serialize;
use tokio::process::Command;
use tokio::sync::Notify;

use crate::config::{SpeechConfig, VoiceConfig};
use crate::speech::error::SpeechError;

/// Remote audio for a piece of text.
pub trait SpeechSource: Send + Sync {
    fn fetch(&self, text: &str) -> impl Future<Output = Result<Bytes, SpeechError>> + Send;
}

/// On-device speech synthesis.
pub trait LocalVoice: Send + Sync {
    fn speak(
        &self,
        text: &str,
        prosody: Prosody,
    ) -> impl Future<Output = Result<(), SpeechError>> + Send;

    fn stop(&self);
}

/// Plays encoded audio.
pub trait AudioSink: Send + Sync {
    fn play(&self, audio: Bytes) -> impl Future<Output = Result<(), SpeechError>> + Send;

    fn stop(&self);
}

/// Rate, pitch and volume for the fallback voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prosody {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for Prosody {
    fn default() -> Self {
        Self {
            rate: 0.8,
            pitch: 1.1,
            volume: 1.0,
        }
    }
}

impl From<&VoiceConfig> for Prosody {
    fn from(config: &VoiceConfig) -> Self {
        Self {
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        }
    }
}

/// How a `speak` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    Remote,
    Local,
    /// Both voices failed. Nothing was heard.
    Silent,
    /// A newer `speak` or a `stop` took over.
    Superseded,
}

pub struct Narrator<S, V, A> {
    source: S,
    voice: V,
    sink: A,
    prosody: Prosody,
    generation: AtomicU64,
    speaking: AtomicBool,
}

impl<S, V, A> Narrator<S, V, A>
where
    S: SpeechSource,
    V: LocalVoice,
    A: AudioSink,
{
    pub fn new(source: S, voice: V, sink: A) -> Self {
        Self {
            source,
            voice,
            sink,
            prosody: Prosody::default(),
            generation: AtomicU64::new(0),
            speaking: AtomicBool::new(false),
        }
    }

    pub fn with_prosody(mut self, prosody: Prosody) -> Self {
        self.prosody = prosody;
        self
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Say `text`, cutting off anything currently playing.
    pub async fn speak(&self, text: &str) -> SpeakOutcome {
        let generation = self.interrupt();
        self.speaking.store(true, Ordering::SeqCst);

        let remote = self.source.fetch(text).await;
        if !self.is_current(generation) {
            tracing::debug!("Dropping stale audio");
            return SpeakOutcome::Superseded;
        }

        let outcome = match remote {
            Ok(audio) => match self.sink.play(audio).await {
                Ok(()) => SpeakOutcome::Remote,
                Err(e) => {
                    tracing::debug!(error = %e, "Playback failed, using local voice");
                    self.speak_locally(text, generation).await
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "Remote speech unavailable, using local voice");
                self.speak_locally(text, generation).await
            }
        };

        if self.is_current(generation) {
            self.speaking.store(false, Ordering::SeqCst);
        }
        outcome
    }

    /// `"{sound}... {phrase}"`, or just the sound.
    pub async fn speak_digraph(&self, sound: &str, example_phrase: Option<&str>) -> SpeakOutcome {
        self.speak(&digraph_line(sound, example_phrase)).await
    }

    pub fn stop(&self) {
        self.interrupt();
        self.speaking.store(false, Ordering::SeqCst);
    }

    async fn speak_locally(&self, text: &str, generation: u64) -> SpeakOutcome {
        if !self.is_current(generation) {
            return SpeakOutcome::Superseded;
        }
        match self.voice.speak(text, self.prosody).await {
            Ok(()) => SpeakOutcome::Local,
            Err(e) => {
                tracing::warn!(error = %e, "Speech failed");
                SpeakOutcome::Silent
            }
        }
    }

    /// Stop playback and start a new generation.
    fn interrupt(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.sink.stop();
        self.voice.stop();
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

pub fn digraph_line(sound: &str, example_phrase: Option<&str>) -> String {
    match example_phrase.map(str::trim).filter(|p| !p.is_empty()) {
        Some(phrase) => format!("{sound}... {phrase}"),
        None => sound.to_string(),
    }
}

/// Fetches audio from the speech proxy's `/api/tts`.
pub struct ProxyVoice {
    client: Client,
    url: Url,
    voice_id: Option<String>,
    timeout: Duration,
}

#[derive(Serialize)]
struct ProxyRequest<'a> {
    text: &'a str,
    #[serde(rename = "voiceId", skip_serializing_if = "Option::is_none")]
    voice_id: Option<&'a str>,
}

impl ProxyVoice {
    pub fn from_config(config: &SpeechConfig) -> Result<Self, SpeechError> {
        Self::new(
            &config.proxy_url,
            None,
            Duration::from_secs(u64::from(config.timeout_seconds)),
        )
    }

    pub fn new(
        proxy_url: &str,
        voice_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let invalid = |reason: String| SpeechError::InvalidUrl {
            url: proxy_url.to_string(),
            reason,
        };
        let mut url = Url::parse(proxy_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("not a base URL".to_string()))?
            .pop_if_empty()
            .extend(["api", "tts"]);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SpeechError::Internal(format!("Failed to build proxy client: {e}")))?;

        Ok(Self {
            client,
            url,
            voice_id,
            timeout,
        })
    }
}

impl SpeechSource for ProxyVoice {
    async fn fetch(&self, text: &str) -> Result<Bytes, SpeechError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&ProxyRequest {
                text,
                voice_id: self.voice_id.as_deref(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout {
                        duration: self.timeout.as_secs(),
                    }
                } else {
                    SpeechError::Connection { source: e }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Upstream {
                status: status.as_u16(),
            });
        }
        response
            .bytes()
            .await
            .map_err(|e| SpeechError::Internal(format!("Failed to read audio: {e}")))
    }
}

/// Speaks through an espeak-compatible program (`-s` words per minute,
/// `-p` pitch 0-99, `-a` amplitude 0-200).
pub struct CommandVoice {
    program: String,
    cancel: Notify,
}

/// Words per minute at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

impl CommandVoice {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cancel: Notify::new(),
        }
    }

    fn args(text: &str, prosody: Prosody) -> Vec<String> {
        let speed = (BASE_WORDS_PER_MINUTE * prosody.rate).round().clamp(80.0, 450.0);
        let pitch = (prosody.pitch * 50.0).round().clamp(0.0, 99.0);
        let amplitude = (prosody.volume * 100.0).round().clamp(0.0, 200.0);
        vec![
            "-s".to_string(),
            format!("{speed}"),
            "-p".to_string(),
            format!("{pitch}"),
            "-a".to_string(),
            format!("{amplitude}"),
            text.to_string(),
        ]
    }
}

impl LocalVoice for CommandVoice {
    async fn speak(&self, text: &str, prosody: Prosody) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(Self::args(text, prosody))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Playback(format!("{}: {e}", self.program)))?;

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| SpeechError::Playback(e.to_string()))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(SpeechError::Playback(format!("{} exited with {status}", self.program)))
                }
            }
            _ = self.cancel.notified() => {
                let _ = child.kill().await;
                Ok(())
            }
        }
    }

    fn stop(&self) {
        self.cancel.notify_waiters();
    }
}

/// A voice that is never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentVoice;

impl LocalVoice for SilentVoice {
    async fn speak(&self, _text: &str, _prosody: Prosody) -> Result<(), SpeechError> {
        Err(SpeechError::Playback("no local voice configured".to_string()))
    }

    fn stop(&self) {}
}

/// Writes each clip to a file for an external player.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl AudioSink for FileSink {
    async fn play(&self, audio: Bytes) -> Result<(), SpeechError> {
        tokio::fs::write(&self.path, &audio)
            .await
            .map_err(|source| SpeechError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn stop(&self) {}
}
