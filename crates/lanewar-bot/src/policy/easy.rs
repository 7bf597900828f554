use super::{Policy, PolicyContext};
use lanewar_core::model::lane::Lane;
use rand::RngCore;
use rand::seq::SliceRandom;

/// Avoids badly trailing lanes, otherwise plays at random. No lookahead.
#[derive(Debug, Default, Clone, Copy)]
pub struct EasyPolicy;

impl EasyPolicy {
    pub fn new() -> Self {
        Self
    }

    fn candidates(ctx: &PolicyContext<'_>) -> Vec<Lane> {
        let evals = ctx.evaluate();
        let comfortable: Vec<Lane> = evals
            .iter()
            .filter(|eval| eval.open && eval.diff > -ctx.params.easy_deficit_threshold)
            .map(|eval| eval.lane)
            .collect();
        if !comfortable.is_empty() {
            return comfortable;
        }

        let open: Vec<Lane> = evals
            .iter()
            .filter(|eval| eval.open)
            .map(|eval| eval.lane)
            .collect();
        if !open.is_empty() {
            return open;
        }

        Lane::ALL.to_vec()
    }
}

impl Policy for EasyPolicy {
    fn choose_lane(&mut self, ctx: &PolicyContext<'_>, rng: &mut dyn RngCore) -> Lane {
        Self::candidates(ctx)
            .choose(rng)
            .copied()
            .unwrap_or(Lane::Center)
    }

    fn name(&self) -> &'static str {
        "easy"
    }
}
