mod easy;
mod evaluation;
mod random;
mod strategic;
#[cfg(test)]
pub(crate) mod testing;

pub use easy::EasyPolicy;
pub use evaluation::{LaneEval, evaluate_lanes, least_bad, live_lanes, rank_lanes, targets};
pub use random::RandomPolicy;
pub use strategic::StrategicPolicy;

use crate::params::PolicyParams;
use lanewar_core::game::state::GameState;
use lanewar_core::model::lane::Lane;
use lanewar_core::model::side::Side;
use rand::RngCore;
use tracing::{Level, event};

/// Read-only view handed to a policy for one decision.
pub struct PolicyContext<'a> {
    pub side: Side,
    pub state: &'a GameState,
    pub params: &'a PolicyParams,
    pub can_peek: bool,
}

impl<'a> PolicyContext<'a> {
    pub fn new(side: Side, state: &'a GameState, params: &'a PolicyParams, can_peek: bool) -> Self {
        Self {
            side,
            state,
            params,
            can_peek,
        }
    }

    /// Value of the card this side draws next when peeking is allowed,
    /// otherwise (or on an empty deck) the configured average.
    pub fn own_next_value(&self) -> i32 {
        if !self.can_peek {
            return self.params.average_card_value;
        }
        self.state
            .peek(self.side)
            .map(|card| card.value)
            .unwrap_or(self.params.average_card_value)
    }

    pub fn open_lanes(&self) -> Vec<Lane> {
        self.state.open_lanes(self.side)
    }

    pub fn evaluate(&self) -> [LaneEval; 3] {
        evaluate_lanes(self.state, self.side, self.params)
    }
}

/// Lane selection strategy for one side.
pub trait Policy: Send {
    fn choose_lane(&mut self, ctx: &PolicyContext<'_>, rng: &mut dyn RngCore) -> Lane;

    /// Whether the policy may look at its own next card.
    fn can_peek(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

/// Asks `policy` for a lane on behalf of `side` and enforces the per-lane cap.
pub fn decide(
    policy: &mut dyn Policy,
    side: Side,
    state: &GameState,
    params: &PolicyParams,
    rng: &mut dyn RngCore,
) -> Lane {
    let ctx = PolicyContext::new(side, state, params, policy.can_peek());
    let proposed = policy.choose_lane(&ctx, rng);
    let chosen = enforce_capacity(state, side, proposed, params);

    if tracing::enabled!(Level::DEBUG) {
        event!(
            target: "lanewar_bot::policy",
            Level::DEBUG,
            policy = policy.name(),
            side = %side,
            proposed = %proposed,
            chosen = %chosen,
            redirected = proposed != chosen,
            round = state.rounds_played() + 1,
        );
    }

    chosen
}

/// Keeps `lane` if `side` still has room there, otherwise moves to the open
/// lane with the best differential. Only returns a full lane when every lane
/// is full.
pub fn enforce_capacity(state: &GameState, side: Side, lane: Lane, params: &PolicyParams) -> Lane {
    if state.has_capacity(lane, side) {
        return lane;
    }
    let evals = evaluate_lanes(state, side, params);
    least_bad(&evals).map(|eval| eval.lane).unwrap_or(lane)
}
