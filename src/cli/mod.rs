//! Command implementations for the `phonics` binary.

pub mod play;
pub mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use phonics_garden::cloud::{CloudClient, CloudError, CloudSync, SyncQueue};
use phonics_garden::config::Config;
use phonics_garden::game::{GameStore, SystemClock};
use phonics_garden::speech::{
    CommandVoice, FileSink, LocalVoice, Narrator, Prosody, ProxyVoice, SilentVoice, SpeakOutcome,
    SpeechError,
};
use phonics_garden::storage::LocalStorage;

/// How long to wait for pending uploads before exiting.
const SYNC_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Cloud {
    pub sync: CloudSync,
    pub queue: SyncQueue,
}

/// Everything a game command needs.
pub struct App {
    pub config: Config,
    pub store: GameStore,
    pub cloud: Option<Cloud>,
}

impl App {
    /// Open local state and, when configured, connect the cloud.
    pub async fn open(config: Config) -> Result<Self> {
        let storage = LocalStorage::new(config.state_path());
        let store = GameStore::open(storage, Arc::new(SystemClock))
            .context("Failed to open game state")?;

        let cloud = match CloudClient::from_config(&config.cloud) {
            Ok(client) => {
                let (queue, _worker) = SyncQueue::spawn(client.clone());
                store.attach_sync(Arc::new(queue.clone()));
                let sync = CloudSync::new(client, config.player.name.clone());
                sync.initialize_player(&store).await;
                Some(Cloud { sync, queue })
            }
            Err(CloudError::NotConfigured { reason }) => {
                tracing::debug!(reason = %reason, "Cloud sync disabled");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cloud sync unavailable");
                None
            }
        };

        Ok(Self {
            config,
            store,
            cloud,
        })
    }

    /// Wait for pending uploads.
    pub async fn finish(self) {
        let Some(cloud) = self.cloud else {
            return;
        };
        if !cloud.queue.flush(SYNC_FLUSH_TIMEOUT).await {
            eprintln!("Cloud sync did not finish in time; it will catch up next run.");
        }
        let status = cloud.queue.status();
        if status.failure_count() > 0 {
            tracing::warn!(failures = status.failure_count(), "Some cloud syncs failed");
        }
    }

    pub fn narrator(&self, out: &Path) -> Result<Narrator<ProxyVoice, FallbackVoice, FileSink>> {
        let source = ProxyVoice::from_config(&self.config.speech)?;
        let voice = match &self.config.voice.fallback_command {
            Some(program) if !program.trim().is_empty() => {
                FallbackVoice::Command(CommandVoice::new(program.trim()))
            }
            _ => FallbackVoice::Silent(SilentVoice),
        };
        let narrator = Narrator::new(source, voice, FileSink::new(out))
            .with_prosody(Prosody::from(&self.config.voice));
        Ok(narrator)
    }
}

/// The configured on-device voice, if any.
pub enum FallbackVoice {
    Command(CommandVoice),
    Silent(SilentVoice),
}

impl LocalVoice for FallbackVoice {
    async fn speak(&self, text: &str, prosody: Prosody) -> Result<(), SpeechError> {
        match self {
            FallbackVoice::Command(voice) => voice.speak(text, prosody).await,
            FallbackVoice::Silent(voice) => voice.speak(text, prosody).await,
        }
    }

    fn stop(&self) {
        match self {
            FallbackVoice::Command(voice) => voice.stop(),
            FallbackVoice::Silent(voice) => voice.stop(),
        }
    }
}

/// Where `say` and `--speak` put remote audio unless told otherwise.
pub fn default_clip_path() -> PathBuf {
    std::env::temp_dir().join("phonics-garden-say.mp3")
}

pub fn describe_outcome(outcome: SpeakOutcome, sink: &Path) -> String {
    match outcome {
        SpeakOutcome::Remote => format!("Audio saved to {}", sink.display()),
        SpeakOutcome::Local => "Spoken with the local voice.".to_string(),
        SpeakOutcome::Silent => "No voice available.".to_string(),
        SpeakOutcome::Superseded => "Interrupted.".to_string(),
    }
}
