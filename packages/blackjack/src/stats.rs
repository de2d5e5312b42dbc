use crate::HandOutcome;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LEN: usize = 10;

/// One entry of the recent results ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMark {
    Win,
    Push,
    Loss,
}

impl RoundMark {
    /// `+1`, `0` or `-1`.
    pub fn score(&self) -> i8 {
        match self {
            RoundMark::Win => 1,
            RoundMark::Push => 0,
            RoundMark::Loss => -1,
        }
    }
}

impl From<HandOutcome> for RoundMark {
    fn from(outcome: HandOutcome) -> Self {
        match outcome {
            HandOutcome::Win | HandOutcome::NaturalWin => RoundMark::Win,
            HandOutcome::Push => RoundMark::Push,
            HandOutcome::Loss => RoundMark::Loss,
        }
    }
}

/// Point-in-time copy of every tracker field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub biggest_win: u64,
    /// Oldest first
    pub recent: Vec<i8>,
}

impl StatsSnapshot {
    /// Wins over decided rounds, pushes excluded. `None` before any decision.
    pub fn win_rate(&self) -> Option<f64> {
        let decided = self.wins + self.losses;
        (decided > 0).then(|| self.wins as f64 / decided as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTracker {
    games_played: u32,
    wins: u32,
    losses: u32,
    pushes: u32,
    current_streak: u32,
    best_streak: u32,
    biggest_win: u64,
    history: VecDeque<RoundMark>,
    capacity: usize,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LEN)
    }
}

impl StatsTracker {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            games_played: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            current_streak: 0,
            best_streak: 0,
            biggest_win: 0,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a resolved round. `payout` is the amount won above the stake.
    pub fn record(&mut self, outcome: HandOutcome, payout: u64) {
        self.games_played += 1;
        match outcome {
            HandOutcome::Win | HandOutcome::NaturalWin => {
                self.wins += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
                self.biggest_win = self.biggest_win.max(payout);
            }
            HandOutcome::Push => {
                self.pushes += 1;
                self.current_streak = 0;
            }
            HandOutcome::Loss => {
                self.losses += 1;
                self.current_streak = 0;
            }
        }

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(outcome.into());
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn history(&self) -> impl Iterator<Item = RoundMark> + '_ {
        self.history.iter().copied()
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            games_played: self.games_played,
            wins: self.wins,
            losses: self.losses,
            pushes: self.pushes,
            current_streak: self.current_streak,
            best_streak: self.best_streak,
            biggest_win: self.biggest_win,
            recent: self.history.iter().map(RoundMark::score).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaks() {
        let mut stats = StatsTracker::default();
        stats.record(HandOutcome::Win, 100);
        stats.record(HandOutcome::NaturalWin, 150);
        stats.record(HandOutcome::Win, 100);
        assert_eq!(stats.current_streak(), 3);

        stats.record(HandOutcome::Push, 0);
        assert_eq!(stats.current_streak(), 0);
        stats.record(HandOutcome::Win, 50);
        stats.record(HandOutcome::Loss, 0);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.games_played, 6);
        assert_eq!(snapshot.wins, 4);
        assert_eq!(snapshot.losses, 1);
        assert_eq!(snapshot.pushes, 1);
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.best_streak, 3);
        assert_eq!(snapshot.biggest_win, 150);
        assert_eq!(snapshot.recent, vec![1, 1, 1, 0, 1, -1]);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut stats = StatsTracker::default();
        stats.record(HandOutcome::Loss, 0);
        for _ in 0..DEFAULT_HISTORY_LEN {
            stats.record(HandOutcome::Win, 10);
        }
        let recent = stats.snapshot().recent;
        assert_eq!(recent.len(), DEFAULT_HISTORY_LEN);
        assert!(recent.iter().all(|mark| *mark == 1));
        assert_eq!(stats.games_played(), 11);
    }

    #[test]
    fn test_custom_capacity() {
        let mut stats = StatsTracker::with_capacity(2);
        stats.record(HandOutcome::Win, 10);
        stats.record(HandOutcome::Push, 0);
        stats.record(HandOutcome::Loss, 0);
        let marks: Vec<RoundMark> = stats.history().collect();
        assert_eq!(marks, vec![RoundMark::Push, RoundMark::Loss]);
    }

    #[test]
    fn test_win_rate() {
        let mut stats = StatsTracker::default();
        assert_eq!(stats.snapshot().win_rate(), None);
        stats.record(HandOutcome::Win, 10);
        stats.record(HandOutcome::Push, 0);
        stats.record(HandOutcome::Loss, 0);
        assert_eq!(stats.snapshot().win_rate(), Some(0.5));
    }
}
