use super::evaluation::{LaneEval, evaluate_lanes, least_bad, live_lanes, rank_lanes, targets};
use super::{Policy, PolicyContext};
use lanewar_core::model::lane::Lane;
use rand::RngCore;
use tracing::{Level, event};

/// Why a strategic tier picked its lane. Only used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reason {
    AllLost,
    SingleLive,
    SecondExposed,
    BestSecure,
    Contest,
    HighCardFlip,
    HighCardReinforce,
    Projection,
}

impl Reason {
    const fn as_str(self) -> &'static str {
        match self {
            Reason::AllLost => "all_lost",
            Reason::SingleLive => "single_live",
            Reason::SecondExposed => "second_exposed",
            Reason::BestSecure => "best_secure",
            Reason::Contest => "contest",
            Reason::HighCardFlip => "high_card_flip",
            Reason::HighCardReinforce => "high_card_reinforce",
            Reason::Projection => "projection",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Decision {
    lane: Lane,
    reason: Reason,
}

/// Pro and Hard+ tiers. Both aim at winning two lanes out of three; Hard+
/// additionally peeks its own next card and looks one enemy move ahead.
#[derive(Debug, Clone, Copy)]
pub struct StrategicPolicy {
    peek: bool,
}

impl StrategicPolicy {
    pub fn pro() -> Self {
        Self { peek: false }
    }

    pub fn hard_plus() -> Self {
        Self { peek: true }
    }

    fn pro_decision(evals: &[LaneEval]) -> Decision {
        let ranked = rank_lanes(live_lanes(evals));
        match targets(&ranked, 2) {
            [] => Decision {
                lane: least_bad(evals).map(|eval| eval.lane).unwrap_or(Lane::Center),
                reason: Reason::AllLost,
            },
            [only] => Decision {
                lane: only.lane,
                reason: Reason::SingleLive,
            },
            [best, second, ..] => {
                // The second lane decides the majority whichever way the
                // top pair looks; the reason only records what triggered it.
                let reason = if second.is_exposed() {
                    Reason::SecondExposed
                } else if best.secure {
                    Reason::BestSecure
                } else {
                    Reason::Contest
                };
                Decision {
                    lane: second.lane,
                    reason,
                }
            }
        }
    }

    fn hard_plus_decision(ctx: &PolicyContext<'_>, evals: &[LaneEval]) -> Decision {
        let pro = Self::pro_decision(evals);
        let ranked = rank_lanes(live_lanes(evals));
        let (best, second) = match targets(&ranked, 2) {
            [best, second, ..] => (*best, *second),
            _ => return pro,
        };
        if second.is_exposed() || best.secure {
            return pro;
        }

        let card = ctx.own_next_value();
        if card >= ctx.params.high_card_threshold {
            let flips = [second, best]
                .into_iter()
                .find(|eval| eval.diff <= 0 && eval.diff + card > 0);
            return match flips {
                Some(eval) => Decision {
                    lane: eval.lane,
                    reason: Reason::HighCardFlip,
                },
                None => Decision {
                    lane: second.lane,
                    reason: Reason::HighCardReinforce,
                },
            };
        }

        let enemy = predict_enemy_lane(ctx);
        let enemy_card = ctx.params.average_card_value;
        let projected = |played: Lane, target: &LaneEval| {
            let mut diff = target.diff;
            if played == target.lane {
                diff += card;
            }
            if enemy == Some(target.lane) {
                diff -= enemy_card;
            }
            diff
        };

        let mut candidates = vec![best.lane, second.lane];
        candidates.extend(ranked.iter().skip(2).map(|eval| eval.lane));

        // Strict comparison: ties stay with the leading lane.
        let mut chosen = pro.lane;
        let mut chosen_score = i32::MIN;
        for lane in candidates {
            let score = projected(lane, &best).min(projected(lane, &second));
            if score > chosen_score {
                chosen = lane;
                chosen_score = score;
            }
        }

        Decision {
            lane: chosen,
            reason: Reason::Projection,
        }
    }
}

/// The enemy's greedy reply: its own second-best live lane, else its best.
fn predict_enemy_lane(ctx: &PolicyContext<'_>) -> Option<Lane> {
    let enemy = ctx.side.opponent();
    let evals = evaluate_lanes(ctx.state, enemy, ctx.params);
    let ranked = rank_lanes(live_lanes(&evals));
    match targets(&ranked, 2) {
        [_, second, ..] => Some(second.lane),
        [only] => Some(only.lane),
        [] => None,
    }
}

impl Policy for StrategicPolicy {
    fn choose_lane(&mut self, ctx: &PolicyContext<'_>, _rng: &mut dyn RngCore) -> Lane {
        let evals = ctx.evaluate();
        let decision = if self.peek {
            Self::hard_plus_decision(ctx, &evals)
        } else {
            Self::pro_decision(&evals)
        };

        if tracing::enabled!(Level::TRACE) {
            event!(
                target: "lanewar_bot::policy",
                Level::TRACE,
                policy = self.name(),
                side = %ctx.side,
                lane = %decision.lane,
                reason = decision.reason.as_str(),
                diffs = ?evals.map(|eval| eval.diff),
            );
        }

        decision.lane
    }

    fn can_peek(&self) -> bool {
        self.peek
    }

    fn name(&self) -> &'static str {
        if self.peek { "hard_plus" } else { "pro" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PolicyParams;
    use crate::policy::testing::{
        fill_lane, state_with_diffs, state_with_next_card, state_with_plays,
    };
    use lanewar_core::game::state::GameState;
    use lanewar_core::model::side::Side;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pick(mut policy: StrategicPolicy, state: &GameState) -> Lane {
        let params = PolicyParams::default();
        let ctx = PolicyContext::new(Side::Two, state, &params, policy.can_peek());
        let mut rng = StdRng::seed_from_u64(0);
        policy.choose_lane(&ctx, &mut rng)
    }

    #[test]
    fn pro_contests_the_second_lane() {
        let state = state_with_diffs([30, 2, -10]);
        assert_eq!(pick(StrategicPolicy::pro(), &state), Lane::Center);
    }

    #[test]
    fn pro_focuses_a_single_live_lane() {
        let state = state_with_diffs([-40, 5, -50]);
        assert_eq!(pick(StrategicPolicy::pro(), &state), Lane::Center);
    }

    #[test]
    fn pro_plays_least_negative_when_everything_is_lost() {
        let state = state_with_diffs([-60, -45, -30]);
        assert_eq!(pick(StrategicPolicy::pro(), &state), Lane::Right);
    }

    #[test]
    fn pro_reason_tracks_the_trigger() {
        let exposed = [
            LaneEval {
                lane: Lane::Left,
                diff: 12,
                mine: 2,
                theirs: 1,
                lost: false,
                secure: false,
                open: true,
            },
            LaneEval {
                lane: Lane::Center,
                diff: 4,
                mine: 1,
                theirs: 0,
                lost: false,
                secure: false,
                open: true,
            },
            LaneEval {
                lane: Lane::Right,
                diff: -3,
                mine: 0,
                theirs: 1,
                lost: false,
                secure: false,
                open: true,
            },
        ];
        let decision = StrategicPolicy::pro_decision(&exposed);
        assert_eq!(decision.lane, Lane::Center);
        assert_eq!(decision.reason, Reason::SecondExposed);
    }

    #[test]
    fn hard_plus_high_card_flips_the_best_lane_when_second_is_out_of_reach() {
        let state = state_with_next_card(9, [-2, -20, -40]);
        assert_eq!(pick(StrategicPolicy::pro(), &state), Lane::Center);
        assert_eq!(pick(StrategicPolicy::hard_plus(), &state), Lane::Left);
    }

    #[test]
    fn hard_plus_high_card_prefers_flipping_second() {
        let state = state_with_next_card(9, [-1, -5, -30]);
        assert_eq!(pick(StrategicPolicy::hard_plus(), &state), Lane::Center);
    }

    #[test]
    fn hard_plus_defends_the_lane_the_enemy_will_hit() {
        // With right full for the enemy it contests left, our best lane.
        let mut state = state_with_diffs([4, 3, -10]);
        fill_lane(&mut state, Lane::Right, Side::One);
        assert_eq!(pick(StrategicPolicy::pro(), &state), Lane::Center);
        assert_eq!(pick(StrategicPolicy::hard_plus(), &state), Lane::Left);
    }

    #[test]
    fn hard_plus_keeps_off_a_secure_lane_with_a_weak_card() {
        let state = state_with_next_card(-10, [30, 2, -10]);
        assert_eq!(pick(StrategicPolicy::pro(), &state), Lane::Center);
        assert_eq!(pick(StrategicPolicy::hard_plus(), &state), Lane::Center);
    }

    #[test]
    fn hard_plus_grabs_an_exposed_second_lane_before_projecting() {
        // Same board as the defence case, but nobody opposes us in center.
        let mut state = state_with_plays(&[
            (Lane::Left, Side::One, 5),
            (Lane::Left, Side::Two, 9),
            (Lane::Center, Side::Two, 3),
            (Lane::Right, Side::One, 5),
            (Lane::Right, Side::Two, -5),
        ]);
        fill_lane(&mut state, Lane::Right, Side::One);
        assert_eq!(pick(StrategicPolicy::hard_plus(), &state), Lane::Center);
    }

    #[test]
    fn hard_plus_projection_ties_go_to_the_leading_lane() {
        // A zero card changes nothing, so every candidate scores the same.
        let state = state_with_next_card(0, [10, 5, -10]);
        assert_eq!(pick(StrategicPolicy::pro(), &state), Lane::Center);
        assert_eq!(pick(StrategicPolicy::hard_plus(), &state), Lane::Left);
    }

    #[test]
    fn only_hard_plus_peeks() {
        assert!(!StrategicPolicy::pro().can_peek());
        assert!(StrategicPolicy::hard_plus().can_peek());
    }
}
