//! Pure state transitions for the game.

use chrono::NaiveDate;

use crate::catalog;
use crate::game::intent::{GameIntent, Intent};
use crate::game::progress::DigraphProgress;
use crate::game::state::GameState;
use crate::game::streak::DAILY_GOAL_SECONDS;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen and must
/// stay a pure function of `(State, Intent)`. Time enters through the
/// intents themselves.
pub trait Reducer {
    type State: Clone + PartialEq + Default;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}

pub struct GameReducer;

impl Reducer for GameReducer {
    type State = GameState;
    type Intent = GameIntent;

    fn reduce(mut state: GameState, intent: GameIntent) -> GameState {
        match intent {
            GameIntent::SelectLesson { lesson_id } => {
                if catalog::contains(&lesson_id) {
                    state.current_lesson = Some(lesson_id);
                } else {
                    tracing::debug!(lesson_id = %lesson_id, "Ignoring selection of unknown lesson");
                }
            }
            GameIntent::MarkExplored { lesson_id } => {
                with_lesson(&mut state, &lesson_id, |p| p.explored = true);
            }
            GameIntent::MarkIntroSeen { lesson_id } => {
                with_lesson(&mut state, &lesson_id, |p| p.has_seen_intro = true);
            }
            GameIntent::RecordPractice { lesson_id, correct } => {
                let known = with_lesson(&mut state, &lesson_id, |p| p.record_attempt(correct));
                if known && correct {
                    state.rewards.add_stars(1);
                }
            }
            GameIntent::AddStars { count } => state.rewards.add_stars(count),
            GameIntent::AddSticker { sticker } => {
                state.rewards.add_sticker(&sticker);
            }
            GameIntent::AddRainbowStripe => state.rewards.add_rainbow_stripe(),
            GameIntent::ResetProgress => state.reset_progress(),
            GameIntent::StartSession { now } => state.timer.start(now),
            GameIntent::EndSession { now } => {
                if state.timer.end(now).is_some() {
                    evaluate_streak(&mut state, now.date());
                }
            }
            GameIntent::EvaluateStreak { today } => evaluate_streak(&mut state, today),
            GameIntent::RedeemIceCream => {
                if !state.streak.redeem() {
                    tracing::debug!("Ice cream not earned yet, nothing to redeem");
                }
            }
            GameIntent::AssignPlayer {
                player_id,
                player_name,
            } => {
                state.player.player_id = Some(player_id);
                state.player.player_name = player_name;
            }
            GameIntent::ApplyRemote(snapshot) => state.apply_remote(snapshot),
        }
        state
    }
}

/// Apply `f` to a lesson's progress. Unknown lesson ids are a silent no-op.
fn with_lesson(
    state: &mut GameState,
    lesson_id: &str,
    f: impl FnOnce(&mut DigraphProgress),
) -> bool {
    match state.progress.get_mut(lesson_id) {
        Some(progress) => {
            f(progress);
            true
        }
        None => {
            tracing::debug!(lesson_id = %lesson_id, "Ignoring progress update for unknown lesson");
            false
        }
    }
}

/// Credit `today` when the daily goal has been met on that date.
fn evaluate_streak(state: &mut GameState, today: NaiveDate) {
    if state.timer.seconds_on(today) < DAILY_GOAL_SECONDS {
        return;
    }
    let update = state.streak.credit_day(today);
    tracing::debug!(?update, streak_days = state.streak.streak_days, "Daily goal met");
}
