//! The game state store.
//!
//! A cloneable handle around the single in-memory [`GameState`]. Every
//! mutation goes through [`GameStore::dispatch`], which runs the reducer,
//! saves the new state locally when it changed, and hands it to the sync
//! sink. None of this waits on the network.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::game::clock::Clock;
use crate::game::intent::GameIntent;
use crate::game::reducer::{GameReducer, Reducer};
use crate::game::state::GameState;
use crate::storage::{LocalStorage, StorageError};

/// Receives state after each cloud-visible mutation.
///
/// Implementations must return immediately; the actual upload happens
/// elsewhere.
pub trait SyncSink: Send + Sync {
    fn push(&self, state: &GameState);
}

#[derive(Clone)]
pub struct GameStore {
    inner: Arc<Mutex<StoreInner>>,
    clock: Arc<dyn Clock>,
}

struct StoreInner {
    state: GameState,
    storage: Option<LocalStorage>,
    sync: Option<Arc<dyn SyncSink>>,
}

impl GameStore {
    /// Load the saved game (or a fresh one) and keep saving to `storage`.
    pub fn open(storage: LocalStorage, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        let state = storage.load()?;
        tracing::debug!(path = %storage.path().display(), "Loaded game state");
        Ok(Self::build(state, Some(storage), clock))
    }

    /// A store that never touches the disk.
    pub fn in_memory(state: GameState, clock: Arc<dyn Clock>) -> Self {
        Self::build(state, None, clock)
    }

    fn build(state: GameState, storage: Option<LocalStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state,
                storage,
                sync: None,
            })),
            clock,
        }
    }

    pub fn attach_sync(&self, sink: Arc<dyn SyncSink>) {
        self.inner.lock().sync = Some(sink);
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.inner.lock().state.clone()
    }

    pub fn player_id(&self) -> Option<String> {
        self.inner.lock().state.player.player_id.clone()
    }

    pub fn player_name(&self) -> String {
        self.inner.lock().state.player.player_name.clone()
    }

    /// Apply one intent and return the resulting state.
    pub fn dispatch(&self, intent: GameIntent) -> GameState {
        let name = intent.name();
        let synced = intent.is_synced();

        let mut inner = self.inner.lock();
        let next = GameReducer::reduce(inner.state.clone(), intent);
        let changed = next != inner.state;
        inner.state = next.clone();

        if changed {
            if let Some(storage) = &inner.storage {
                if let Err(e) = storage.save(&next) {
                    tracing::warn!(intent = name, error = %e, "Failed to save game state");
                }
            }
        }
        if synced {
            if let Some(sink) = &inner.sync {
                sink.push(&next);
            }
        }

        tracing::trace!(intent = name, changed, "Dispatched");
        next
    }

    pub fn dispatch_all(&self, intents: impl IntoIterator<Item = GameIntent>) -> GameState {
        let mut last = None;
        for intent in intents {
            last = Some(self.dispatch(intent));
        }
        last.unwrap_or_else(|| self.snapshot())
    }

    pub fn select_lesson(&self, lesson_id: &str) -> GameState {
        self.dispatch(GameIntent::SelectLesson {
            lesson_id: lesson_id.to_string(),
        })
    }

    pub fn mark_explored(&self, lesson_id: &str) -> GameState {
        self.dispatch(GameIntent::MarkExplored {
            lesson_id: lesson_id.to_string(),
        })
    }

    pub fn mark_intro_seen(&self, lesson_id: &str) -> GameState {
        self.dispatch(GameIntent::MarkIntroSeen {
            lesson_id: lesson_id.to_string(),
        })
    }

    pub fn record_practice_attempt(&self, lesson_id: &str, correct: bool) -> GameState {
        self.dispatch(GameIntent::RecordPractice {
            lesson_id: lesson_id.to_string(),
            correct,
        })
    }

    pub fn add_stars(&self, count: u32) -> GameState {
        self.dispatch(GameIntent::AddStars { count })
    }

    pub fn add_sticker(&self, sticker: &str) -> GameState {
        self.dispatch(GameIntent::AddSticker {
            sticker: sticker.to_string(),
        })
    }

    pub fn add_rainbow_stripe(&self) -> GameState {
        self.dispatch(GameIntent::AddRainbowStripe)
    }

    pub fn reset_progress(&self) -> GameState {
        self.dispatch(GameIntent::ResetProgress)
    }

    /// Called when a game screen opens.
    pub fn start_session(&self) -> GameState {
        let now = self.clock.now();
        self.dispatch(GameIntent::StartSession { now })
    }

    /// Called when a game screen closes.
    pub fn end_session(&self) -> GameState {
        let now = self.clock.now();
        self.dispatch(GameIntent::EndSession { now })
    }

    /// Start a session that ends when the returned guard is dropped.
    pub fn begin_session(&self) -> PlaySession<'_> {
        self.start_session();
        PlaySession {
            store: self,
            open: true,
        }
    }

    pub fn evaluate_streak(&self) -> GameState {
        let today = self.clock.now().date();
        self.dispatch(GameIntent::EvaluateStreak { today })
    }

    pub fn redeem_ice_cream(&self) -> GameState {
        self.dispatch(GameIntent::RedeemIceCream)
    }
}

/// An open play session on a [`GameStore`].
///
/// Ends the session on drop, so time played before an early return or an
/// error still counts toward the daily goal.
pub struct PlaySession<'a> {
    store: &'a GameStore,
    open: bool,
}

impl PlaySession<'_> {
    /// End the session now and return the resulting state.
    pub fn end(mut self) -> GameState {
        self.open = false;
        self.store.end_session()
    }
}

impl Drop for PlaySession<'_> {
    fn drop(&mut self) {
        if self.open {
            self.store.end_session();
        }
    }
}
