use crate::model::ledger::Ledger;
use crate::model::side::Side;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Final result of a game, from side one's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Best of three lanes; tied lanes count for nobody.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let one = ledger.lanes_won(Side::One);
        let two = ledger.lanes_won(Side::Two);
        match one.cmp(&two) {
            core::cmp::Ordering::Greater => Outcome::Win,
            core::cmp::Ordering::Less => Outcome::Loss,
            core::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// The same result seen from `side`.
    pub const fn for_side(self, side: Side) -> Self {
        match (side, self) {
            (Side::One, outcome) => outcome,
            (Side::Two, Outcome::Win) => Outcome::Loss,
            (Side::Two, Outcome::Loss) => Outcome::Win,
            (Side::Two, Outcome::Draw) => Outcome::Draw,
        }
    }

    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win => Some(Side::One),
            Outcome::Loss => Some(Side::Two),
            Outcome::Draw => None,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Loss => 'L',
            Outcome::Draw => 'D',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Draw => "draw",
        };
        f.write_str(label)
    }
}
