use super::{Policy, PolicyContext};
use lanewar_core::model::lane::Lane;
use rand::RngCore;
use rand::seq::SliceRandom;

/// Uniform choice over the lanes that still have room.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for RandomPolicy {
    fn choose_lane(&mut self, ctx: &PolicyContext<'_>, rng: &mut dyn RngCore) -> Lane {
        let open = ctx.open_lanes();
        let pool: &[Lane] = if open.is_empty() { &Lane::ALL } else { &open };
        pool.choose(rng).copied().unwrap_or(Lane::Center)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
