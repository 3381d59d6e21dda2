use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::game::progress::DigraphProgress;
use crate::game::rewards::RewardState;
use crate::game::streak::StreakState;
use crate::game::timer::SessionTimer;

/// Name of the single player profile.
pub const DEFAULT_PLAYER_NAME: &str = "Yaya";

/// Remote identity of the (only) player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerIdentity {
    pub player_id: Option<String>,
    pub player_name: String,
}

impl Default for PlayerIdentity {
    fn default() -> Self {
        Self {
            player_id: None,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

/// Everything the game remembers between runs.
///
/// This is the value persisted locally and the source of every sync payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub player: PlayerIdentity,
    /// Keyed by lesson id; always holds an entry for every catalog lesson.
    pub progress: BTreeMap<String, DigraphProgress>,
    pub current_lesson: Option<String>,
    pub rewards: RewardState,
    pub streak: StreakState,
    pub timer: SessionTimer,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            player: PlayerIdentity::default(),
            progress: default_progress(),
            current_lesson: None,
            rewards: RewardState::default(),
            streak: StreakState::default(),
            timer: SessionTimer::default(),
        }
    }
}

/// Fresh progress entries for every catalog lesson.
pub fn default_progress() -> BTreeMap<String, DigraphProgress> {
    catalog::lesson_ids()
        .map(|id| (id.to_string(), DigraphProgress::default()))
        .collect()
}

impl GameState {
    /// Fill in lessons missing from an older snapshot and drop unknown ones.
    pub fn normalized(mut self) -> Self {
        let mut progress = default_progress();
        for (id, entry) in std::mem::take(&mut self.progress) {
            if let Some(slot) = progress.get_mut(&id) {
                *slot = entry.normalized();
            }
        }
        self.progress = progress;
        self.rewards = self.rewards.normalized();
        if let Some(id) = &self.current_lesson {
            if !catalog::contains(id) {
                self.current_lesson = None;
            }
        }
        self
    }

    pub fn lesson(&self, id: &str) -> Option<&DigraphProgress> {
        self.progress.get(id)
    }

    pub fn explored_count(&self) -> usize {
        self.progress.values().filter(|p| p.explored).count()
    }

    pub fn mastered_count(&self) -> usize {
        self.progress.values().filter(|p| p.mastered).count()
    }

    pub fn all_explored(&self) -> bool {
        self.progress.values().all(|p| p.explored)
    }

    pub fn all_mastered(&self) -> bool {
        self.progress.values().all(|p| p.mastered)
    }

    /// Progress in catalog order, paired with the lesson it belongs to.
    pub fn lessons_in_order(
        &self,
    ) -> impl Iterator<Item = (&'static catalog::Digraph, &DigraphProgress)> + '_ {
        catalog::DIGRAPHS
            .iter()
            .filter_map(|d| self.progress.get(d.id).map(|p| (d, p)))
    }

    /// Put progress and rewards back to a fresh game.
    ///
    /// Streak, play timer and player identity are kept.
    pub fn reset_progress(&mut self) {
        self.progress = default_progress();
        self.current_lesson = None;
        self.rewards = RewardState::default();
    }
}

/// Remote reward/streak record, already decoded from its row form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteRewards {
    pub stars: u32,
    pub stickers: Vec<String>,
    pub rainbow_stripes: u8,
    pub streak_days: u32,
    pub last_play_date: Option<NaiveDate>,
    pub ice_cream_earned: bool,
    pub ice_cream_redeemed: bool,
}

/// State loaded back from the cloud, ready to merge over local state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSnapshot {
    /// Per-lesson rows found remotely. Empty means "keep local progress".
    pub progress: Vec<(String, DigraphProgress)>,
    pub rewards: Option<RemoteRewards>,
}

impl GameState {
    /// Merge remote state: remote wins wherever it has a record.
    ///
    /// Progress is rebuilt from defaults with remote rows laid over it when
    /// any rows exist; reward and streak fields are replaced wholesale when a
    /// reward record exists.
    pub fn apply_remote(&mut self, remote: RemoteSnapshot) {
        if !remote.progress.is_empty() {
            let mut progress = default_progress();
            for (id, entry) in remote.progress {
                match progress.get_mut(&id) {
                    Some(slot) => *slot = entry.normalized(),
                    None => tracing::debug!(lesson_id = %id, "Ignoring remote progress for unknown lesson"),
                }
            }
            self.progress = progress;
        }

        if let Some(rewards) = remote.rewards {
            self.rewards = RewardState {
                stars: rewards.stars,
                stickers: rewards.stickers,
                rainbow_stripes: rewards.rainbow_stripes,
            }
            .normalized();
            self.streak.streak_days = rewards.streak_days;
            self.streak.last_play_date = rewards.last_play_date;
            self.streak.ice_cream_earned = rewards.ice_cream_earned;
            self.streak.ice_cream_redeemed = rewards.ice_cream_redeemed;
        }
    }
}
