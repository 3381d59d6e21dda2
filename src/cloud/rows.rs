//! Row shapes of the three remote tables.
//!
//! Columns the store may leave null are `Option`s; decoding maps nulls to
//! the local defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::game::{
    DigraphProgress, GameState, RemoteRewards, RewardState, MAX_RAINBOW_STRIPES,
};

/// `player_profiles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfileRow {
    pub id: String,
    pub player_name: String,
}

/// `player_progress`, one row per (player, lesson).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRow {
    pub player_id: String,
    pub digraph_id: String,
    #[serde(default)]
    pub explored: Option<bool>,
    #[serde(default)]
    pub practice_correct: Option<u32>,
    #[serde(default)]
    pub practice_attempts: Option<u32>,
    #[serde(default)]
    pub mastered: Option<bool>,
    #[serde(default)]
    pub has_seen_intro: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ProgressRow {
    pub fn from_progress(
        player_id: &str,
        digraph_id: &str,
        progress: &DigraphProgress,
        updated_at: &str,
    ) -> Self {
        Self {
            player_id: player_id.to_string(),
            digraph_id: digraph_id.to_string(),
            explored: Some(progress.explored),
            practice_correct: Some(progress.practice_correct),
            practice_attempts: Some(progress.practice_attempts),
            mastered: Some(progress.mastered),
            has_seen_intro: Some(progress.has_seen_intro),
            updated_at: Some(updated_at.to_string()),
        }
    }

    /// Rows written before the intro flag existed inherit it from `explored`.
    pub fn into_progress(self) -> (String, DigraphProgress) {
        let explored = self.explored.unwrap_or(false);
        let progress = DigraphProgress {
            explored,
            has_seen_intro: self.has_seen_intro.unwrap_or(explored),
            practice_correct: self.practice_correct.unwrap_or(0),
            practice_attempts: self.practice_attempts.unwrap_or(0),
            mastered: self.mastered.unwrap_or(false),
        };
        (self.digraph_id, progress.normalized())
    }
}

/// `player_rewards`, one aggregate row per player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsRow {
    pub player_id: String,
    #[serde(default)]
    pub stars: Option<u32>,
    #[serde(default)]
    pub stickers: Option<Vec<String>>,
    #[serde(default)]
    pub rainbow_stripes: Option<u32>,
    #[serde(default)]
    pub streak_days: Option<u32>,
    #[serde(default)]
    pub last_play_date: Option<NaiveDate>,
    #[serde(default)]
    pub ice_cream_earned: Option<bool>,
    #[serde(default)]
    pub ice_cream_redeemed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl RewardsRow {
    pub fn from_state(player_id: &str, state: &GameState, updated_at: &str) -> Self {
        let RewardState {
            stars,
            stickers,
            rainbow_stripes,
        } = &state.rewards;
        Self {
            player_id: player_id.to_string(),
            stars: Some(*stars),
            stickers: Some(stickers.clone()),
            rainbow_stripes: Some(u32::from(*rainbow_stripes)),
            streak_days: Some(state.streak.streak_days),
            last_play_date: state.streak.last_play_date,
            ice_cream_earned: Some(state.streak.ice_cream_earned),
            ice_cream_redeemed: Some(state.streak.ice_cream_redeemed),
            updated_at: Some(updated_at.to_string()),
        }
    }

    pub fn into_remote(self) -> RemoteRewards {
        let stripes = self
            .rainbow_stripes
            .unwrap_or(0)
            .min(u32::from(MAX_RAINBOW_STRIPES));
        RemoteRewards {
            stars: self.stars.unwrap_or(0),
            stickers: self.stickers.unwrap_or_default(),
            rainbow_stripes: u8::try_from(stripes).unwrap_or(MAX_RAINBOW_STRIPES),
            streak_days: self.streak_days.unwrap_or(0),
            last_play_date: self.last_play_date,
            ice_cream_earned: self.ice_cream_earned.unwrap_or(false),
            ice_cream_redeemed: self.ice_cream_redeemed.unwrap_or(false),
        }
    }
}
