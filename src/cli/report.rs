use chrono::Local;
use phonics_garden::catalog::Sticker;
use phonics_garden::cloud::SyncStatus;
use phonics_garden::game::{GameState, StreakPhase, DAILY_GOAL_SECONDS, MASTERY_THRESHOLD};

pub fn print_lessons(state: &GameState) {
    for (lesson, progress) in state.lessons_in_order() {
        let mark = if progress.mastered {
            "★ mastered"
        } else if progress.explored {
            "✓ explored"
        } else {
            "· new"
        };
        let current = if state.current_lesson.as_deref() == Some(lesson.id) {
            " <"
        } else {
            ""
        };
        println!(
            "{}. {:<3} {:<6} {:<11} practice {}/{} (mastery at {}){}",
            lesson.order,
            lesson.letters,
            lesson.sound,
            mark,
            progress.practice_correct,
            progress.practice_attempts,
            MASTERY_THRESHOLD,
            current
        );
    }
}

pub fn print_status(state: &GameState, sync: Option<&SyncStatus>) {
    let today = Local::now().date_naive();
    let lessons = state.progress.len();

    println!("Player: {}", state.player.player_name);
    println!(
        "Lessons: {}/{} explored, {}/{} mastered",
        state.explored_count(),
        lessons,
        state.mastered_count(),
        lessons
    );
    println!("Stars: {}", state.rewards.stars);

    let stickers: Vec<String> = state
        .rewards
        .stickers
        .iter()
        .map(|emoji| match Sticker::find(emoji) {
            Some(sticker) => format!("{} {}", sticker.emoji, sticker.name),
            None => emoji.clone(),
        })
        .collect();
    if stickers.is_empty() {
        println!("Stickers: none yet");
    } else {
        println!("Stickers: {}", stickers.join(", "));
    }

    let stripes = usize::from(state.rewards.rainbow_stripes);
    println!(
        "Rainbow: {}{}",
        "█".repeat(stripes),
        if state.rewards.rainbow_complete() {
            " complete!"
        } else {
            ""
        }
    );

    let phase = state.streak.phase();
    match phase {
        StreakPhase::Accumulating(_) => println!(
            "Streak: {} ({} more day(s) until ice cream)",
            phase.label(),
            state.streak.days_until_treat()
        ),
        _ => println!("Streak: {}", phase.label()),
    }

    let played = state.timer.seconds_on(today);
    println!(
        "Today: {}m {}s of {}m goal{}",
        played / 60,
        played % 60,
        DAILY_GOAL_SECONDS / 60,
        if state.timer.is_open() {
            " (session open)"
        } else {
            ""
        }
    );

    match sync {
        Some(status) => {
            let last = status
                .last_synced_at()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "not this run".to_string());
            println!(
                "Cloud: player {} (last sync: {}, failures: {})",
                state.player.player_id.as_deref().unwrap_or("unassigned"),
                last,
                status.failure_count()
            );
        }
        None => println!("Cloud: offline"),
    }
}
