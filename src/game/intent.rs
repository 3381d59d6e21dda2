use chrono::{NaiveDate, NaiveDateTime};

use crate::game::state::RemoteSnapshot;

/// Marker trait for actions the reducer understands.
///
/// Intents cover both player actions (answering a question, finishing a
/// lesson) and system events (session timing, cloud data arriving).
pub trait Intent: Send + 'static {}

/// Every way the game state can change.
#[derive(Debug, Clone, PartialEq)]
pub enum GameIntent {
    SelectLesson { lesson_id: String },
    MarkExplored { lesson_id: String },
    MarkIntroSeen { lesson_id: String },
    RecordPractice { lesson_id: String, correct: bool },
    AddStars { count: u32 },
    AddSticker { sticker: String },
    AddRainbowStripe,
    ResetProgress,
    StartSession { now: NaiveDateTime },
    /// Closes the open session and evaluates the streak for `now`'s date.
    EndSession { now: NaiveDateTime },
    EvaluateStreak { today: NaiveDate },
    RedeemIceCream,
    AssignPlayer { player_id: String, player_name: String },
    ApplyRemote(RemoteSnapshot),
}

impl Intent for GameIntent {}

impl GameIntent {
    /// Whether the change should be mirrored to the cloud.
    ///
    /// Navigation, session start and data that came from the cloud in the
    /// first place stay local.
    pub fn is_synced(&self) -> bool {
        !matches!(
            self,
            GameIntent::SelectLesson { .. }
                | GameIntent::StartSession { .. }
                | GameIntent::AssignPlayer { .. }
                | GameIntent::ApplyRemote(_)
        )
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            GameIntent::SelectLesson { .. } => "select_lesson",
            GameIntent::MarkExplored { .. } => "mark_explored",
            GameIntent::MarkIntroSeen { .. } => "mark_intro_seen",
            GameIntent::RecordPractice { .. } => "record_practice",
            GameIntent::AddStars { .. } => "add_stars",
            GameIntent::AddSticker { .. } => "add_sticker",
            GameIntent::AddRainbowStripe => "add_rainbow_stripe",
            GameIntent::ResetProgress => "reset_progress",
            GameIntent::StartSession { .. } => "start_session",
            GameIntent::EndSession { .. } => "end_session",
            GameIntent::EvaluateStreak { .. } => "evaluate_streak",
            GameIntent::RedeemIceCream => "redeem_ice_cream",
            GameIntent::AssignPlayer { .. } => "assign_player",
            GameIntent::ApplyRemote(_) => "apply_remote",
        }
    }
}
