use serde::{Deserialize, Serialize};

/// Correct answers needed before a lesson counts as mastered.
pub const MASTERY_THRESHOLD: u32 = 5;

/// Progress for a single lesson.
///
/// Counters only ever grow; `practice_correct <= practice_attempts` holds
/// after every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigraphProgress {
    /// The lesson walk-through has been completed.
    pub explored: bool,
    /// The intro sequence has played at least once. Gates intro replay.
    pub has_seen_intro: bool,
    pub practice_correct: u32,
    pub practice_attempts: u32,
    /// Sticky once `practice_correct` reaches [`MASTERY_THRESHOLD`].
    pub mastered: bool,
}

impl DigraphProgress {
    /// Count one practice answer.
    pub fn record_attempt(&mut self, correct: bool) {
        self.practice_attempts = self.practice_attempts.saturating_add(1);
        if correct {
            self.practice_correct = self.practice_correct.saturating_add(1);
        }
        self.mastered = self.mastered || self.practice_correct >= MASTERY_THRESHOLD;
    }

    /// Repair counters coming from outside (remote rows, old snapshots).
    pub fn normalized(mut self) -> Self {
        if self.practice_correct > self.practice_attempts {
            self.practice_attempts = self.practice_correct;
        }
        self.mastered = self.mastered || self.practice_correct >= MASTERY_THRESHOLD;
        self
    }

    /// Fraction of attempts answered correctly, `None` before the first attempt.
    pub fn accuracy(&self) -> Option<f64> {
        if self.practice_attempts == 0 {
            None
        } else {
            Some(f64::from(self.practice_correct) / f64::from(self.practice_attempts))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_answers_count_attempts_only() {
        let mut p = DigraphProgress::default();
        p.record_attempt(false);
        p.record_attempt(false);
        assert_eq!(p.practice_attempts, 2);
        assert_eq!(p.practice_correct, 0);
        assert!(!p.mastered);
    }

    #[test]
    fn mastery_flips_on_fifth_correct_answer() {
        let mut p = DigraphProgress::default();
        for _ in 0..4 {
            p.record_attempt(true);
            assert!(!p.mastered);
        }
        p.record_attempt(true);
        assert!(p.mastered);
        p.record_attempt(false);
        assert!(p.mastered);
    }

    #[test]
    fn normalized_restores_correct_not_above_attempts() {
        let p = DigraphProgress {
            practice_correct: 6,
            practice_attempts: 2,
            ..Default::default()
        }
        .normalized();
        assert_eq!(p.practice_attempts, 6);
        assert!(p.mastered);
    }

    #[test]
    fn accuracy() {
        let mut p = DigraphProgress::default();
        assert_eq!(p.accuracy(), None);
        p.record_attempt(true);
        p.record_attempt(false);
        assert_eq!(p.accuracy(), Some(0.5));
    }
}
