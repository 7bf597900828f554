//! Lane evaluation pipeline shared by the strategic tiers:
//! evaluate every lane, drop lost or full ones, rank the rest by differential,
//! then pick from the top of the ranking.

use crate::params::PolicyParams;
use lanewar_core::game::state::GameState;
use lanewar_core::model::lane::{LANE_COUNT, Lane};
use lanewar_core::model::side::Side;

/// A lane as seen by one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneEval {
    pub lane: Lane,
    /// Own score minus opposing score.
    pub diff: i32,
    pub mine: usize,
    pub theirs: usize,
    pub lost: bool,
    pub secure: bool,
    /// Still under the per-lane cap for the evaluating side.
    pub open: bool,
}

impl LaneEval {
    /// No opposing card has been committed here yet.
    pub fn is_exposed(&self) -> bool {
        self.theirs == 0
    }
}

pub fn evaluate_lanes(state: &GameState, side: Side, params: &PolicyParams) -> [LaneEval; LANE_COUNT] {
    let ledger = state.ledger();
    Lane::ALL.map(|lane| {
        let diff = ledger.diff(lane, side);
        LaneEval {
            lane,
            diff,
            mine: ledger.cards_played(lane, side),
            theirs: ledger.cards_played(lane, side.opponent()),
            lost: diff < -params.lost_threshold,
            secure: diff > params.secure_threshold,
            open: state.has_capacity(lane, side),
        }
    })
}

/// Open lanes that are not written off.
pub fn live_lanes(evals: &[LaneEval]) -> Vec<LaneEval> {
    evals
        .iter()
        .copied()
        .filter(|eval| eval.open && !eval.lost)
        .collect()
}

/// Best differential first. The sort is stable, so equal lanes keep
/// left/center/right order.
pub fn rank_lanes(mut lanes: Vec<LaneEval>) -> Vec<LaneEval> {
    lanes.sort_by(|a, b| b.diff.cmp(&a.diff));
    lanes
}

/// The first `k` ranked lanes. Two lanes out of three win the game, so the
/// strategic tiers use `k = 2`.
pub fn targets(ranked: &[LaneEval], k: usize) -> &[LaneEval] {
    &ranked[..ranked.len().min(k)]
}

/// Least negative open lane, falling back to all lanes when every lane is full.
pub fn least_bad(evals: &[LaneEval]) -> Option<LaneEval> {
    let open: Vec<LaneEval> = evals.iter().copied().filter(|eval| eval.open).collect();
    let pool = if open.is_empty() { evals.to_vec() } else { open };
    rank_lanes(pool).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::testing::state_with_diffs;

    #[test]
    fn evaluation_uses_own_perspective() {
        let state = state_with_diffs([30, 2, -10]);
        let params = PolicyParams::default();

        let mine = evaluate_lanes(&state, Side::Two, &params);
        assert_eq!(mine.map(|e| e.diff), [30, 2, -10]);
        assert!(mine[0].secure);
        assert!(!mine[2].lost);

        let theirs = evaluate_lanes(&state, Side::One, &params);
        assert_eq!(theirs.map(|e| e.diff), [-30, -2, 10]);
        assert!(theirs[0].lost);
    }

    #[test]
    fn live_lanes_drop_lost_and_full() {
        let state = state_with_diffs([-40, 0, 5]);
        let mut evals = evaluate_lanes(&state, Side::Two, &PolicyParams::default());
        evals[2].open = false;
        let live = live_lanes(&evals);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].lane, Lane::Center);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let state = state_with_diffs([3, 7, 3]);
        let evals = evaluate_lanes(&state, Side::Two, &PolicyParams::default());
        let ranked = rank_lanes(live_lanes(&evals));
        let order: Vec<Lane> = ranked.iter().map(|e| e.lane).collect();
        assert_eq!(order, vec![Lane::Center, Lane::Left, Lane::Right]);
        assert_eq!(targets(&ranked, 2).len(), 2);
        assert_eq!(targets(&ranked[..1], 2).len(), 1);
    }

    #[test]
    fn least_bad_prefers_smallest_deficit() {
        let state = state_with_diffs([-60, -30, -45]);
        let evals = evaluate_lanes(&state, Side::Two, &PolicyParams::default());
        assert!(live_lanes(&evals).is_empty());
        assert_eq!(least_bad(&evals).map(|e| e.lane), Some(Lane::Center));
    }
}
