//! Background upload of game state.
//!
//! The queue holds a single slot. Each push overwrites it, and one worker
//! task uploads whatever is in the slot when it gets to it, so a burst of
//! mutations collapses into one upload of the newest state and uploads
//! never interleave.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use crate::cloud::client::CloudClient;
use crate::cloud::error::CloudError;
use crate::cloud::rows::{ProgressRow, RewardsRow};
use crate::game::{GameState, SyncSink};

/// Everything uploaded for one player in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPayload {
    pub player_id: String,
    pub progress: Vec<ProgressRow>,
    pub rewards: RewardsRow,
}

impl SyncPayload {
    /// `None` until the player has a remote identity.
    pub fn from_state(state: &GameState) -> Option<Self> {
        let player_id = state.player.player_id.as_deref()?;
        let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let progress = state
            .progress
            .iter()
            .map(|(id, p)| ProgressRow::from_progress(player_id, id, p, &updated_at))
            .collect();

        Some(Self {
            player_id: player_id.to_string(),
            progress,
            rewards: RewardsRow::from_state(player_id, state, &updated_at),
        })
    }
}

/// Shared view of the worker's progress.
#[derive(Debug, Default)]
pub struct SyncStatus {
    syncing: AtomicBool,
    requested: AtomicU64,
    completed: AtomicU64,
    failures: AtomicU64,
    last_synced_at: Mutex<Option<DateTime<Utc>>>,
    notify: Notify,
}

impl SyncStatus {
    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::SeqCst)
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        *self.last_synced_at.lock()
    }

    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::SeqCst)
    }

    /// Pushes not yet handled by the worker.
    pub fn has_pending(&self) -> bool {
        self.completed.load(Ordering::SeqCst) < self.requested.load(Ordering::SeqCst)
    }
}

type Slot = Option<(u64, SyncPayload)>;

/// Handle to the single-slot sync queue. Cheap to clone.
#[derive(Clone)]
pub struct SyncQueue {
    tx: Arc<watch::Sender<Slot>>,
    status: Arc<SyncStatus>,
}

impl SyncQueue {
    /// Start the worker on the current tokio runtime.
    ///
    /// The worker exits once every queue handle is dropped and the last
    /// payload has been handled.
    pub fn spawn(client: CloudClient) -> (Self, JoinHandle<()>) {
        let (tx, rx) = watch::channel(None);
        let status = Arc::new(SyncStatus::default());
        let handle = tokio::spawn(run_worker(client, rx, status.clone()));
        (
            Self {
                tx: Arc::new(tx),
                status,
            },
            handle,
        )
    }

    /// Replace whatever is waiting with `payload`. Never blocks.
    pub fn push_payload(&self, payload: SyncPayload) {
        let status = &self.status;
        self.tx.send_modify(|slot| {
            let seq = status.requested.fetch_add(1, Ordering::SeqCst) + 1;
            *slot = Some((seq, payload));
        });
    }

    pub fn status(&self) -> Arc<SyncStatus> {
        self.status.clone()
    }

    /// Wait until every payload pushed so far has been handled.
    ///
    /// Returns `false` on timeout.
    pub async fn flush(&self, timeout: Duration) -> bool {
        let target = self.status.requested.load(Ordering::SeqCst);
        let status = &self.status;

        let wait = async {
            loop {
                let notified = status.notify.notified();
                if status.completed.load(Ordering::SeqCst) >= target {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.is_ok()
    }
}

impl SyncSink for SyncQueue {
    fn push(&self, state: &GameState) {
        match SyncPayload::from_state(state) {
            Some(payload) => self.push_payload(payload),
            None => tracing::trace!("No player id yet, skipping sync"),
        }
    }
}

async fn run_worker(client: CloudClient, mut rx: watch::Receiver<Slot>, status: Arc<SyncStatus>) {
    while rx.changed().await.is_ok() {
        let slot = rx.borrow_and_update().clone();
        let Some((seq, payload)) = slot else {
            continue;
        };

        status.syncing.store(true, Ordering::SeqCst);
        match upload(&client, &payload).await {
            Ok(()) => {
                *status.last_synced_at.lock() = Some(Utc::now());
                tracing::debug!(player_id = %payload.player_id, seq, "Synced to cloud");
            }
            Err(e) => {
                status.failures.fetch_add(1, Ordering::SeqCst);
                tracing::warn!(player_id = %payload.player_id, error = %e, "Cloud sync failed");
            }
        }
        status.syncing.store(false, Ordering::SeqCst);
        status.completed.fetch_max(seq, Ordering::SeqCst);
        status.notify.notify_waiters();
    }
    tracing::debug!("Sync worker stopped");
}

/// One progress upsert for all lessons, then the aggregate rewards row.
async fn upload(client: &CloudClient, payload: &SyncPayload) -> Result<(), CloudError> {
    client.upsert_progress(&payload.progress).await?;
    client.upsert_rewards(&payload.rewards).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_needs_player_id() {
        let mut state = GameState::default();
        assert!(SyncPayload::from_state(&state).is_none());

        state.player.player_id = Some("p1".to_string());
        state.rewards.stars = 4;
        let payload = SyncPayload::from_state(&state).unwrap();
        assert_eq!(payload.progress.len(), state.progress.len());
        assert!(payload.progress.iter().all(|r| r.player_id == "p1"));
        assert_eq!(payload.rewards.stars, Some(4));
    }
}
