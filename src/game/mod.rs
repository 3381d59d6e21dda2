//! Game state, rules and the store that owns them.
//!
//! State changes follow an intent/reducer flow: callers build a
//! [`GameIntent`], the [`GameStore`] runs it through [`GameReducer`] and
//! takes care of persistence and cloud sync.

mod clock;
mod intent;
mod progress;
mod reducer;
mod rewards;
pub mod rounds;
mod state;
mod store;
mod streak;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use intent::{GameIntent, Intent};
pub use progress::{DigraphProgress, MASTERY_THRESHOLD};
pub use reducer::{GameReducer, Reducer};
pub use rewards::{RewardState, MAX_RAINBOW_STRIPES};
pub use state::{
    default_progress, GameState, PlayerIdentity, RemoteRewards, RemoteSnapshot,
    DEFAULT_PLAYER_NAME,
};
pub use store::{GameStore, PlaySession, SyncSink};
pub use streak::{StreakPhase, StreakState, StreakUpdate, DAILY_GOAL_SECONDS, STREAK_GOAL};
pub use timer::SessionTimer;
