//! Interactive game screens on the terminal.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use phonics_garden::catalog::{self, Digraph};
use phonics_garden::game::rounds::{self, HuntGame, MatchGame, RoundOutcome};
use phonics_garden::game::GameStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::{describe_outcome, App};

/// Read one trimmed line. `None` on end of input or `q`.
fn ask(question: &str) -> Result<Option<String>> {
    print!("{question} ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let answer = line.trim().to_string();
    if answer.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    Ok(Some(answer))
}

/// Resolve an answer typed as a 1-based option number or as the option itself.
fn pick<'a, T>(answer: &str, options: &'a [T], name: impl Fn(&T) -> &str) -> Option<&'a T> {
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i));
    }
    options
        .iter()
        .find(|option| name(option).eq_ignore_ascii_case(answer))
}

pub fn lesson(id: &str) -> Result<&'static Digraph> {
    match catalog::by_id(id) {
        Some(lesson) => Ok(lesson),
        None => bail!(
            "Unknown lesson '{id}'. Try one of: {}",
            catalog::lesson_ids().collect::<Vec<_>>().join(", ")
        ),
    }
}

fn apply(store: &GameStore, outcome: RoundOutcome) {
    println!("{}", outcome.feedback);
    store.dispatch_all(outcome.intents);
}

async fn narrate(app: &App, text: &str) -> Result<()> {
    let out = crate::cli::default_clip_path();
    let narrator = app.narrator(&out)?;
    let outcome = narrator.speak(text).await;
    println!("  ({})", describe_outcome(outcome, &out));
    Ok(())
}

async fn narrate_digraph(app: &App, sound: &str, example_phrase: Option<&str>) -> Result<()> {
    let out = crate::cli::default_clip_path();
    let narrator = app.narrator(&out)?;
    let outcome = narrator.speak_digraph(sound, example_phrase).await;
    println!("  ({})", describe_outcome(outcome, &out));
    Ok(())
}

pub async fn intro(app: &App, id: &str, speak: bool) -> Result<()> {
    let lesson = lesson(id)?;
    app.store.select_lesson(lesson.id);
    let session = app.store.begin_session();

    for line in [lesson.intro.letter1, lesson.intro.letter2, lesson.intro.together] {
        println!("{line}");
        if speak {
            narrate(app, line).await?;
        }
    }
    println!("Mouth: {}", lesson.mouth_position);
    println!("Tip: {}", lesson.teaching_tip);

    app.store.dispatch_all(rounds::finish_intro(lesson.id));
    session.end();
    Ok(())
}

pub async fn explore(app: &App, id: &str, speak: bool) -> Result<()> {
    let lesson = lesson(id)?;
    app.store.select_lesson(lesson.id);
    let session = app.store.begin_session();

    println!("{} says {} ({})", lesson.letters, lesson.sound, lesson.phonetic);
    if speak {
        narrate_digraph(app, lesson.audio_text, Some(lesson.example_phrase)).await?;
    }
    let words = |list: &[catalog::DigraphWord]| {
        list.iter()
            .map(|w| format!("{} {}", w.image, w.word))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("At the start: {}", words(lesson.beginning));
    println!("At the end:   {}", words(lesson.ending));
    println!("Special word: {}", lesson.special);

    if ask("Press Enter when you are done (q to stop)")?.is_none() {
        return Ok(());
    }

    let before = app.store.snapshot();
    let state = app
        .store
        .dispatch_all(rounds::finish_lesson(&before, lesson.id));
    if state.rewards.stars > before.rewards.stars {
        println!("⭐ +1 star (total {})", state.rewards.stars);
    }
    if state.all_explored() {
        println!("You explored every sound!");
    }
    session.end();
    Ok(())
}

pub async fn hunt(app: &App, max_rounds: u32, speak: bool) -> Result<()> {
    let mut rng = StdRng::from_os_rng();
    let mut game = HuntGame::new();
    let session = app.store.begin_session();

    for _ in 0..max_rounds {
        let round = game.next_round(&mut rng);
        if speak {
            narrate_digraph(app, round.target.sound_label, None).await?;
        }
        println!(
            "\nWhich letters say {} ({})?",
            round.target.sound, round.target.sound_label
        );
        for (i, option) in round.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option.letters);
        }

        let Some(answer) = ask(">")? else { break };
        let Some(choice) = pick(&answer, &round.options, |d| d.id) else {
            println!("Pick a number from the list.");
            continue;
        };
        let outcome = game.answer(&round, choice.id, &mut rng);
        apply(&app.store, outcome);
    }

    let state = session.end();
    println!(
        "\nScore: {}  Stars: {}  Stickers: {}",
        game.score(),
        state.rewards.stars,
        state.rewards.stickers.len()
    );
    Ok(())
}

pub async fn picture_match(app: &App, max_rounds: u32) -> Result<()> {
    let mut rng = StdRng::from_os_rng();
    let mut game = MatchGame::new();
    let session = app.store.begin_session();

    for _ in 0..max_rounds {
        let Some(round) = game.next_round(&mut rng) else {
            break;
        };
        println!(
            "\nWhich picture has the {} sound ({})?",
            round.lesson.letters, round.lesson.sound_label
        );
        for (i, option) in round.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option.image);
        }

        let Some(answer) = ask(">")? else { break };
        let Some(choice) = pick(&answer, &round.options, |w| w.word) else {
            println!("Pick a number from the list.");
            continue;
        };
        let outcome = game.answer(&round, choice.word, &mut rng);
        if outcome.correct {
            println!("{} {}", round.answer.image, round.answer.word);
        }
        apply(&app.store, outcome);
    }

    let state = session.end();
    println!(
        "\nScore: {}  Stars: {}  Stickers: {}",
        game.score(),
        state.rewards.stars,
        state.rewards.stickers.len()
    );
    Ok(())
}

pub async fn say(app: &App, text: &str, out: &std::path::Path) -> Result<()> {
    let narrator = app.narrator(out)?;
    let outcome = narrator.speak(text).await;
    println!("{}", describe_outcome(outcome, out));
    Ok(())
}
