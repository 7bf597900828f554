use crate::model::card::Card;
use crate::model::lane::{Lane, ParseLaneError};
use crate::model::side::Side;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    InProgress,
    GameOver,
}

/// One side's half of a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub lane: Lane,
    pub card: Card,
    /// Cumulative score of the moving side in `lane` after the play.
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: usize,
    pub side_one: Move,
    pub side_two: Move,
    pub cards_remaining: usize,
}

impl RoundResult {
    pub fn move_for(&self, side: Side) -> &Move {
        match side {
            Side::One => &self.side_one,
            Side::Two => &self.side_two,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error(transparent)]
    InvalidLane(#[from] ParseLaneError),
    #[error("decks must start equal in size (side one {one}, side two {two})")]
    UnevenDecks { one: usize, two: usize },
}
