//! Mini-game rules.
//!
//! Round generation and answer scoring for the sound hunt and picture match
//! games. Rule objects never touch the store; they return the intents the
//! caller should dispatch.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::catalog::{Digraph, DigraphWord, DIGRAPHS, HUNT_STICKERS, MATCH_STICKERS};
use crate::game::intent::GameIntent;
use crate::game::state::GameState;

pub const MIN_HUNT_OPTIONS: usize = 2;
pub const MAX_HUNT_OPTIONS: usize = 5;

/// Consecutive correct answers needed to add a hunt option.
pub const HUNT_LEVEL_UP_RUN: u32 = 3;
pub const HUNT_STRIPE_EVERY: u32 = 5;
pub const HUNT_STICKER_EVERY: u32 = 4;
pub const MATCH_STICKER_EVERY: u32 = 3;
pub const MATCH_DISTRACTORS: usize = 2;

/// What happened after an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    pub correct: bool,
    pub feedback: String,
    pub leveled_up: bool,
    pub intents: Vec<GameIntent>,
}

/// "Which letters make this sound?"
#[derive(Debug, Clone)]
pub struct HuntRound {
    pub target: &'static Digraph,
    pub options: Vec<&'static Digraph>,
}

impl HuntRound {
    /// Pick a target and `option_count` shuffled options that include it.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, option_count: usize) -> Self {
        let count = option_count.clamp(MIN_HUNT_OPTIONS, MAX_HUNT_OPTIONS.min(DIGRAPHS.len()));

        let mut pool: Vec<&'static Digraph> = DIGRAPHS.iter().collect();
        pool.shuffle(rng);
        pool.truncate(count);
        let target = pool[0];
        pool.shuffle(rng);

        Self {
            target,
            options: pool,
        }
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        self.target.id == choice
    }
}

/// Running score of one sound hunt game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntGame {
    score: u32,
    run: u32,
    options: usize,
}

impl Default for HuntGame {
    fn default() -> Self {
        Self {
            score: 0,
            run: 0,
            options: MIN_HUNT_OPTIONS,
        }
    }
}

impl HuntGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of options the next round will show.
    pub fn difficulty(&self) -> usize {
        self.options
    }

    pub fn next_round<R: Rng + ?Sized>(&self, rng: &mut R) -> HuntRound {
        HuntRound::generate(rng, self.options)
    }

    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        round: &HuntRound,
        choice: &str,
        rng: &mut R,
    ) -> RoundOutcome {
        let target = round.target;
        let correct = round.is_correct(choice);
        let mut intents = vec![GameIntent::RecordPractice {
            lesson_id: target.id.to_string(),
            correct,
        }];

        if !correct {
            self.run = 0;
            let feedback = match crate::catalog::by_id(choice) {
                Some(chosen) => format!(
                    "That was the {} sound. Listen for the {} sound!",
                    chosen.letters, target.letters
                ),
                None => format!("Listen for the {} sound!", target.letters),
            };
            return RoundOutcome {
                correct,
                feedback,
                leveled_up: false,
                intents,
            };
        }

        self.score += 1;
        self.run += 1;

        let mut leveled_up = false;
        if self.run % HUNT_LEVEL_UP_RUN == 0 && self.options < MAX_HUNT_OPTIONS {
            self.options += 1;
            leveled_up = true;
        }
        if self.score % HUNT_STRIPE_EVERY == 0 {
            intents.push(GameIntent::AddRainbowStripe);
        }
        if self.score % HUNT_STICKER_EVERY == 0 {
            if let Some(sticker) = HUNT_STICKERS.choose(rng) {
                intents.push(GameIntent::AddSticker {
                    sticker: sticker.to_string(),
                });
            }
        }

        let mut feedback = format!("Yes! You found the {} sound!", target.letters);
        if leveled_up {
            feedback.push_str(" Level up!");
        }

        RoundOutcome {
            correct,
            feedback,
            leveled_up,
            intents,
        }
    }
}

/// "Which picture has this sound?"
#[derive(Debug, Clone)]
pub struct MatchRound {
    pub lesson: &'static Digraph,
    pub answer: &'static DigraphWord,
    pub options: Vec<&'static DigraphWord>,
}

impl MatchRound {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Option<Self> {
        let lesson = DIGRAPHS.choose(rng)?;
        let words: Vec<&'static DigraphWord> = lesson.all_words().collect();
        let answer = *words.choose(rng)?;

        let others: Vec<&'static DigraphWord> = DIGRAPHS
            .iter()
            .filter(|d| d.id != lesson.id)
            .flat_map(|d| d.all_words())
            .filter(|w| w.word != answer.word)
            .collect();
        let mut options: Vec<&'static DigraphWord> = others
            .choose_multiple(rng, MATCH_DISTRACTORS)
            .copied()
            .collect();
        options.push(answer);
        options.shuffle(rng);

        Some(Self {
            lesson,
            answer,
            options,
        })
    }

    pub fn is_correct(&self, word: &str) -> bool {
        self.answer.word.eq_ignore_ascii_case(word)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchGame {
    score: u32,
}

impl MatchGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn next_round<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<MatchRound> {
        MatchRound::generate(rng)
    }

    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        round: &MatchRound,
        word: &str,
        rng: &mut R,
    ) -> RoundOutcome {
        let correct = round.is_correct(word);
        let mut intents = vec![GameIntent::RecordPractice {
            lesson_id: round.lesson.id.to_string(),
            correct,
        }];

        if !correct {
            return RoundOutcome {
                correct,
                feedback: "Let's try again! Listen for the sound.".to_string(),
                leveled_up: false,
                intents,
            };
        }

        self.score += 1;
        if self.score % MATCH_STICKER_EVERY == 0 {
            if let Some(sticker) = MATCH_STICKERS.choose(rng) {
                intents.push(GameIntent::AddSticker {
                    sticker: sticker.to_string(),
                });
            }
        }

        RoundOutcome {
            correct,
            feedback: "Amazing! Great job!".to_string(),
            leveled_up: false,
            intents,
        }
    }
}

/// Intents for finishing a lesson's explore screen.
///
/// The star is only awarded the first time a lesson is explored.
pub fn finish_lesson(state: &GameState, lesson_id: &str) -> Vec<GameIntent> {
    let mut intents = vec![GameIntent::MarkExplored {
        lesson_id: lesson_id.to_string(),
    }];
    if state.lesson(lesson_id).is_some_and(|p| !p.explored) {
        intents.push(GameIntent::AddStars { count: 1 });
    }
    intents
}

/// Intents for finishing a lesson's introduction.
pub fn finish_intro(lesson_id: &str) -> Vec<GameIntent> {
    vec![GameIntent::MarkIntroSeen {
        lesson_id: lesson_id.to_string(),
    }]
}
