use crate::game::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Matches the recent-results strip shown next to the board.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Storage for finished-game outcomes. The engine never owns one; whoever
/// renders results injects it.
pub trait HistoryStore {
    fn append(&mut self, outcome: Outcome);
    /// Oldest first.
    fn load(&self) -> Vec<Outcome>;
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Tally {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        let mut tally = Tally::default();
        for outcome in outcomes {
            tally.add(*outcome);
        }
        tally
    }

    pub fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            self.wins as f64 / self.games() as f64
        }
    }
}

/// In-memory store keeping at most `limit` outcomes, dropping the oldest.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: VecDeque<Outcome>,
    limit: Option<usize>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            entries: VecDeque::new(),
            limit: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tally(&self) -> Tally {
        Tally::from_outcomes(self.entries.iter())
    }

    /// `W`/`L`/`D` letters, oldest first.
    pub fn strip(&self) -> String {
        self.entries.iter().map(|outcome| outcome.letter()).collect()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, outcome: Outcome) {
        if self.limit == Some(0) {
            return;
        }
        self.entries.push_back(outcome);
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    fn load(&self) -> Vec<Outcome> {
        self.entries.iter().copied().collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
