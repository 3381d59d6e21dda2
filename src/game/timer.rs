use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Active play time for the current calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTimer {
    /// Seconds played on `last_session_date`.
    pub today_play_seconds: u64,
    /// Local wall-clock start of the open session.
    pub session_started_at: Option<NaiveDateTime>,
    pub last_session_date: Option<NaiveDate>,
}

impl SessionTimer {
    /// Open a session at `now`, rolling the day total over on a new date.
    pub fn start(&mut self, now: NaiveDateTime) {
        let today = now.date();
        if self.last_session_date != Some(today) {
            self.today_play_seconds = 0;
            self.last_session_date = Some(today);
        }
        self.session_started_at = Some(now);
    }

    /// Close the open session and credit its whole seconds.
    ///
    /// Returns the credited seconds, or `None` when no session was open.
    pub fn end(&mut self, now: NaiveDateTime) -> Option<u64> {
        let started = self.session_started_at.take()?;
        let elapsed = u64::try_from((now - started).num_seconds()).unwrap_or(0);
        self.today_play_seconds = self.today_play_seconds.saturating_add(elapsed);
        Some(elapsed)
    }

    pub fn is_open(&self) -> bool {
        self.session_started_at.is_some()
    }

    /// Seconds played on `date`; zero when the total belongs to another day.
    pub fn seconds_on(&self, date: NaiveDate) -> u64 {
        if self.last_session_date == Some(date) {
            self.today_play_seconds
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn sessions_accumulate_within_a_day() {
        let mut t = SessionTimer::default();
        t.start(at(1, 9, 0, 0));
        assert_eq!(t.end(at(1, 9, 2, 30)), Some(150));
        t.start(at(1, 18, 0, 0));
        assert_eq!(t.end(at(1, 18, 3, 0)), Some(180));
        assert_eq!(t.today_play_seconds, 330);
        assert!(!t.is_open());
    }

    #[test]
    fn new_day_resets_total() {
        let mut t = SessionTimer::default();
        t.start(at(1, 9, 0, 0));
        t.end(at(1, 9, 10, 0));
        t.start(at(2, 9, 0, 0));
        assert_eq!(t.today_play_seconds, 0);
        assert_eq!(t.last_session_date, Some(at(2, 0, 0, 0).date()));
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut t = SessionTimer::default();
        assert_eq!(t.end(at(1, 9, 0, 0)), None);
        assert_eq!(t, SessionTimer::default());
    }

    #[test]
    fn partial_seconds_are_truncated_and_clock_skew_clamped() {
        let mut t = SessionTimer::default();
        t.start(at(1, 9, 0, 0));
        let later = at(1, 9, 0, 59) + chrono::Duration::milliseconds(999);
        assert_eq!(t.end(later), Some(59));

        t.start(at(1, 10, 0, 0));
        assert_eq!(t.end(at(1, 9, 0, 0)), Some(0));
        assert_eq!(t.today_play_seconds, 59);
    }

    #[test]
    fn seconds_on_other_day_is_zero() {
        let mut t = SessionTimer::default();
        t.start(at(1, 9, 0, 0));
        t.end(at(1, 9, 6, 0));
        assert_eq!(t.seconds_on(at(1, 0, 0, 0).date()), 360);
        assert_eq!(t.seconds_on(at(2, 0, 0, 0).date()), 0);
    }
}
