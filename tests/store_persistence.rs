//! The store over real files and a controllable clock: persistence across
//! restarts and multi-day streak play.

mod common;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Duration;
use common::at;
use phonics_garden::game::rounds::{self, HuntGame};
use phonics_garden::game::{GameStore, ManualClock, StreakPhase, MAX_RAINBOW_STRIPES};
use phonics_garden::storage::{LocalStorage, StorageError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn state_file(dir: &TempDir) -> PathBuf {
    dir.path().join("phonics").join("state.json")
}

fn open(path: &Path, clock: &Arc<ManualClock>) -> GameStore {
    GameStore::open(LocalStorage::new(path), clock.clone()).expect("Failed to open store")
}

/// Play `minutes` on `day`, starting at four in the afternoon.
fn play(store: &GameStore, clock: &ManualClock, day: u32, minutes: i64) {
    clock.set(at(day, 16, 0));
    store.start_session();
    clock.advance(Duration::minutes(minutes));
    store.end_session();
}

#[test]
fn progress_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = state_file(&dir);
    let clock = Arc::new(ManualClock::new(at(1, 9, 0)));

    {
        let store = open(&path, &clock);
        store.dispatch_all(rounds::finish_intro("sh"));
        store.dispatch_all(rounds::finish_lesson(&store.snapshot(), "sh"));
        for _ in 0..5 {
            store.record_practice_attempt("ch", true);
        }
        store.record_practice_attempt("ch", false);
        store.add_sticker("🦕");
        store.add_sticker("🦕");
    }

    let reopened = open(&path, &clock).snapshot();
    let sh = reopened.lesson("sh").unwrap();
    assert!(sh.explored && sh.has_seen_intro);
    let ch = reopened.lesson("ch").unwrap();
    assert_eq!((ch.practice_correct, ch.practice_attempts), (5, 6));
    assert!(ch.mastered);
    assert_eq!(reopened.rewards.stars, 1);
    assert_eq!(reopened.rewards.stickers, vec!["🦕".to_string()]);
}

#[test]
fn five_days_of_play_earn_ice_cream() {
    let dir = TempDir::new().unwrap();
    let path = state_file(&dir);
    let clock = Arc::new(ManualClock::new(at(1, 9, 0)));
    let store = open(&path, &clock);

    for day in 1..=4 {
        play(&store, &clock, day, 6);
        assert_eq!(store.snapshot().streak.phase(), StreakPhase::Accumulating(day));
    }
    play(&store, &clock, 5, 5);
    assert_eq!(store.snapshot().streak.phase(), StreakPhase::Earned);

    // a restart does not lose the treat
    let store = open(&path, &clock);
    assert!(store.snapshot().streak.ice_cream_earned);

    let state = store.redeem_ice_cream();
    assert_eq!(state.streak.phase(), StreakPhase::Redeemed);
    assert_eq!(state.streak.streak_days, 0);

    // nothing left to redeem
    assert_eq!(store.redeem_ice_cream(), state);

    play(&store, &clock, 6, 5);
    let state = open(&path, &clock).snapshot();
    assert_eq!(state.streak.phase(), StreakPhase::Accumulating(1));
    assert!(!state.streak.ice_cream_redeemed);
}

#[test]
fn short_sessions_add_up_within_a_day() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(at(3, 9, 0)));
    let store = open(&state_file(&dir), &clock);

    play(&store, &clock, 3, 3);
    assert_eq!(store.snapshot().streak.streak_days, 0);

    clock.set(at(3, 18, 0));
    store.start_session();
    clock.advance(Duration::minutes(2));
    let state = store.end_session();
    assert_eq!(state.timer.today_play_seconds, 300);
    assert_eq!(state.streak.streak_days, 1);

    // more play the same day is not a second credit
    play(&store, &clock, 3, 10);
    assert_eq!(store.snapshot().streak.streak_days, 1);
}

#[test]
fn skipped_day_restarts_the_streak() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(at(1, 9, 0)));
    let store = open(&state_file(&dir), &clock);

    play(&store, &clock, 1, 5);
    play(&store, &clock, 2, 5);
    play(&store, &clock, 3, 1);
    play(&store, &clock, 4, 5);
    let state = store.snapshot();
    assert_eq!(state.streak.streak_days, 1);
    assert_eq!(state.streak.last_play_date, Some(at(4, 0, 0).date()));
}

#[test]
fn evaluate_without_enough_play_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = state_file(&dir);
    let clock = Arc::new(ManualClock::new(at(7, 10, 0)));
    let store = open(&path, &clock);

    let before = store.snapshot();
    assert_eq!(store.evaluate_streak(), before);
    // unchanged state is not written
    assert!(!path.exists());
}

#[test]
fn reset_keeps_streak_and_player() {
    let dir = TempDir::new().unwrap();
    let path = state_file(&dir);
    let clock = Arc::new(ManualClock::new(at(1, 9, 0)));
    let store = open(&path, &clock);

    play(&store, &clock, 1, 5);
    store.dispatch_all(rounds::finish_lesson(&store.snapshot(), "th"));
    store.add_rainbow_stripe();
    store.select_lesson("th");

    let state = store.reset_progress();
    assert_eq!(state.explored_count(), 0);
    assert_eq!(state.rewards.stars, 0);
    assert_eq!(state.rewards.rainbow_stripes, 0);
    assert_eq!(state.current_lesson, None);
    assert_eq!(state.streak.streak_days, 1);

    assert_eq!(open(&path, &clock).snapshot(), state);
}

#[test]
fn hunt_game_rewards_reach_the_store() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(at(2, 9, 0)));
    let store = open(&state_file(&dir), &clock);
    let mut rng = StdRng::seed_from_u64(11);
    let mut game = HuntGame::new();

    for _ in 0..40 {
        let round = game.next_round(&mut rng);
        let outcome = game.answer(&round, round.target.id, &mut rng);
        assert!(outcome.correct);
        store.dispatch_all(outcome.intents);
    }

    let state = store.snapshot();
    assert_eq!(game.score(), 40);
    assert_eq!(state.rewards.rainbow_stripes, MAX_RAINBOW_STRIPES);
    assert!(!state.rewards.stickers.is_empty());
    let attempts: u32 = state.progress.values().map(|p| p.practice_attempts).sum();
    assert_eq!(attempts, 40);
}

#[test]
fn exploring_twice_awards_one_star() {
    let dir = TempDir::new().unwrap();
    let path = state_file(&dir);
    let clock = Arc::new(ManualClock::new(at(2, 9, 0)));

    {
        let store = open(&path, &clock);
        store.dispatch_all(rounds::finish_lesson(&store.snapshot(), "wh"));
        store.dispatch_all(rounds::finish_lesson(&store.snapshot(), "wh"));
        assert_eq!(store.snapshot().rewards.stars, 1);
    }

    // a new run does not re-award it either
    let store = open(&path, &clock);
    let state = store.dispatch_all(rounds::finish_lesson(&store.snapshot(), "wh"));
    assert!(state.lesson("wh").unwrap().explored);
    assert_eq!(state.rewards.stars, 1);
}

#[test]
fn timed_explore_counts_toward_daily_goal() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(at(5, 17, 0)));
    let store = open(&state_file(&dir), &clock);

    let session = store.begin_session();
    assert!(store.snapshot().timer.is_open());
    clock.advance(Duration::minutes(5));
    store.dispatch_all(rounds::finish_lesson(&store.snapshot(), "ch"));
    let state = session.end();

    assert!(!state.timer.is_open());
    assert_eq!(state.timer.today_play_seconds, 300);
    assert_eq!(state.streak.streak_days, 1);
}

#[test]
fn dropped_session_still_credits_time() {
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(at(6, 15, 0)));
    let store = open(&state_file(&dir), &clock);

    let screen = || -> std::io::Result<()> {
        let _session = store.begin_session();
        clock.advance(Duration::minutes(5));
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed"))
    };
    assert!(screen().is_err());

    let state = store.snapshot();
    assert!(!state.timer.is_open());
    assert_eq!(state.timer.today_play_seconds, 300);
    assert_eq!(state.streak.streak_days, 1);
}

#[test]
fn corrupt_state_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = state_file(&dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{\"rewards\": ").unwrap();

    let clock = Arc::new(ManualClock::new(at(1, 9, 0)));
    let err = GameStore::open(LocalStorage::new(&path), clock)
        .err()
        .expect("corrupt file should not open");
    assert!(matches!(err, StorageError::Parse { .. }));
}
