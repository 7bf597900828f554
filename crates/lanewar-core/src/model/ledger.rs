use crate::model::card::Card;
use crate::model::lane::{LANE_COUNT, Lane};
use crate::model::side::Side;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub side: Side,
    pub card: Card,
}

/// Running totals and append-only play history of a single lane.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneRecord {
    scores: [i32; 2],
    counts: [usize; 2],
    history: Vec<Play>,
}

impl LaneRecord {
    pub fn score(&self, side: Side) -> i32 {
        self.scores[side.index()]
    }

    pub fn cards_played(&self, side: Side) -> usize {
        self.counts[side.index()]
    }

    pub fn history(&self) -> &[Play] {
        &self.history
    }

    /// Score of `side` minus score of its opponent.
    pub fn diff(&self, side: Side) -> i32 {
        self.score(side) - self.score(side.opponent())
    }

    /// The side with the strictly higher score, if any.
    pub fn leader(&self) -> Option<Side> {
        match self.diff(Side::One) {
            d if d > 0 => Some(Side::One),
            d if d < 0 => Some(Side::Two),
            _ => None,
        }
    }

    fn push(&mut self, side: Side, card: Card) {
        self.scores[side.index()] += card.value;
        self.counts[side.index()] += 1;
        self.history.push(Play { side, card });
    }
}

/// Mirrors a differential into the other side's perspective.
pub const fn flip(diff: i32) -> i32 {
    -diff
}

/// Per-lane ledger for both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    lanes: [LaneRecord; LANE_COUNT],
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_play(&mut self, lane: Lane, side: Side, card: Card) {
        self.lanes[lane.index()].push(side, card);
    }

    pub fn lane(&self, lane: Lane) -> &LaneRecord {
        &self.lanes[lane.index()]
    }

    pub fn lanes(&self) -> impl Iterator<Item = (Lane, &LaneRecord)> {
        Lane::ALL.into_iter().map(move |lane| (lane, self.lane(lane)))
    }

    pub fn score(&self, lane: Lane, side: Side) -> i32 {
        self.lane(lane).score(side)
    }

    pub fn diff(&self, lane: Lane, side: Side) -> i32 {
        self.lane(lane).diff(side)
    }

    pub fn cards_played(&self, lane: Lane, side: Side) -> usize {
        self.lane(lane).cards_played(side)
    }

    pub fn history(&self, lane: Lane) -> &[Play] {
        self.lane(lane).history()
    }

    pub fn total_committed(&self, side: Side) -> usize {
        self.lanes.iter().map(|record| record.cards_played(side)).sum()
    }

    pub fn lanes_won(&self, side: Side) -> usize {
        self.lanes
            .iter()
            .filter(|record| record.leader() == Some(side))
            .count()
    }
}
