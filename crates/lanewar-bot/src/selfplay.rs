use crate::params::PolicyParams;
use crate::policy::{Policy, decide};
use lanewar_core::game::round::RoundResult;
use lanewar_core::game::state::GameState;
use lanewar_core::model::side::Side;
use rand::RngCore;

/// A policy together with the thresholds it plays under.
pub struct Seat<'a> {
    pub policy: &'a mut dyn Policy,
    pub params: &'a PolicyParams,
}

impl<'a> Seat<'a> {
    pub fn new(policy: &'a mut dyn Policy, params: &'a PolicyParams) -> Self {
        Self { policy, params }
    }
}

/// Resolves one round with both sides chosen by policies. Side two decides
/// first, against the same board side one sees.
pub fn step_seats(
    state: &mut GameState,
    one: &mut Seat<'_>,
    two: &mut Seat<'_>,
    rng: &mut dyn RngCore,
) -> Option<RoundResult> {
    if state.check_game_over() {
        return None;
    }
    let two_lane = decide(&mut *two.policy, Side::Two, state, two.params, rng);
    let one_lane = decide(&mut *one.policy, Side::One, state, one.params, rng);
    state.resolve_round(one_lane, two_lane)
}

/// Plays `state` to the end and returns every round in order.
pub fn play_seats(
    state: &mut GameState,
    mut one: Seat<'_>,
    mut two: Seat<'_>,
    rng: &mut dyn RngCore,
) -> Vec<RoundResult> {
    let mut rounds = Vec::with_capacity(state.cards_remaining());
    while let Some(result) = step_seats(state, &mut one, &mut two, rng) {
        rounds.push(result);
    }
    rounds
}

/// [`step_seats`] with both sides sharing `params`.
pub fn step(
    state: &mut GameState,
    one: &mut dyn Policy,
    two: &mut dyn Policy,
    params: &PolicyParams,
    rng: &mut dyn RngCore,
) -> Option<RoundResult> {
    step_seats(state, &mut Seat::new(one, params), &mut Seat::new(two, params), rng)
}

pub fn play_out(
    state: &mut GameState,
    one: &mut dyn Policy,
    two: &mut dyn Policy,
    params: &PolicyParams,
    rng: &mut dyn RngCore,
) -> Vec<RoundResult> {
    play_seats(state, Seat::new(one, params), Seat::new(two, params), rng)
}
