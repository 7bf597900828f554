use crate::difficulty::Difficulty;
use crate::params::PolicyParams;
use crate::policy::{Policy, RandomPolicy, decide};
use crate::selfplay;
use lanewar_core::game::history::HistoryStore;
use lanewar_core::game::outcome::Outcome;
use lanewar_core::game::round::{RoundError, RoundResult};
use lanewar_core::game::serialization::StateSnapshot;
use lanewar_core::game::state::GameState;
use lanewar_core::model::lane::Lane;
use lanewar_core::model::ruleset::Ruleset;
use lanewar_core::model::side::Side;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

/// One human-controlled side (side one) against a policy-driven opponent.
pub struct DuelController {
    state: GameState,
    difficulty: Difficulty,
    opponent: Box<dyn Policy>,
    params: PolicyParams,
    rng: StdRng,
    seed: u64,
}

impl DuelController {
    pub fn new(ruleset: Ruleset, difficulty: Difficulty) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(ruleset, difficulty, seed)
    }

    pub fn with_seed(ruleset: Ruleset, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_params(ruleset, difficulty, PolicyParams::default(), seed)
    }

    /// Opponent tier and thresholds come from `LANEWAR_DIFFICULTY` and the
    /// `LANEWAR_*` threshold variables.
    pub fn from_env(ruleset: Ruleset) -> Self {
        let seed: u64 = rand::random();
        Self::with_params(ruleset, Difficulty::from_env(), PolicyParams::from_env(), seed)
    }

    pub(crate) fn from_reader<F>(ruleset: Ruleset, seed: u64, mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let difficulty = Difficulty::from_reader(&mut read);
        let params = PolicyParams::from_reader(&mut read);
        Self::with_params(ruleset, difficulty, params, seed)
    }

    pub fn with_params(
        ruleset: Ruleset,
        difficulty: Difficulty,
        params: PolicyParams,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::deal(ruleset, &mut rng);
        Self {
            state,
            difficulty,
            opponent: difficulty.policy(),
            params,
            rng,
            seed,
        }
    }

    /// Reshuffles fresh decks and clears the board. The rng keeps running,
    /// so consecutive games under one seed differ but stay reproducible.
    pub fn initialize_game(&mut self) {
        let ruleset = self.state.ruleset().clone();
        self.state = GameState::deal(ruleset, &mut self.rng);
        event!(
            target: "lanewar_bot::controller",
            Level::INFO,
            ruleset = self.state.ruleset().name(),
            difficulty = %self.difficulty,
            deck_size = self.state.initial_deck_size(),
            "new game"
        );
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.opponent = difficulty.policy();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn params(&self) -> &PolicyParams {
        &self.params
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Commits side one's next card to `lane` and lets the opponent answer.
    /// Returns `None` once the game is over.
    pub fn play_round(&mut self, lane: Lane) -> Option<RoundResult> {
        if self.state.check_game_over() {
            return None;
        }
        let reply = decide(
            self.opponent.as_mut(),
            Side::Two,
            &self.state,
            &self.params,
            &mut self.rng,
        );
        let result = self.state.resolve_round(lane, reply)?;
        self.log_round(&result);
        Some(result)
    }

    /// Parses `lane` first; a bad name leaves the board untouched.
    pub fn play_named_round(&mut self, lane: &str) -> Result<Option<RoundResult>, RoundError> {
        let lane: Lane = lane.parse().map_err(|err| {
            event!(
                target: "lanewar_bot::controller",
                Level::ERROR,
                input = lane,
                "rejected lane"
            );
            RoundError::from(err)
        })?;
        Ok(self.play_round(lane))
    }

    /// Finishes the game with random choices for side one.
    pub fn simulate_rest_of_game(&mut self) -> Vec<RoundResult> {
        let mut driver = RandomPolicy::new();
        self.simulate_with(&mut driver)
    }

    /// Finishes the game with `driver` choosing for side one.
    pub fn simulate_with(&mut self, driver: &mut dyn Policy) -> Vec<RoundResult> {
        let rounds = selfplay::play_out(
            &mut self.state,
            driver,
            self.opponent.as_mut(),
            &self.params,
            &mut self.rng,
        );
        for result in &rounds {
            self.log_round(result);
        }
        rounds
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.state)
    }

    /// Appends the finished game's outcome to `store`. Does nothing while the
    /// game is still running.
    pub fn record_outcome(&self, store: &mut dyn HistoryStore) -> Option<Outcome> {
        let outcome = self.state.outcome()?;
        store.append(outcome);
        event!(
            target: "lanewar_bot::controller",
            Level::INFO,
            outcome = %outcome,
            lanes_won = self.state.ledger().lanes_won(Side::One),
            "game recorded"
        );
        Some(outcome)
    }

    fn log_round(&self, result: &RoundResult) {
        if !tracing::enabled!(Level::DEBUG) {
            return;
        }
        event!(
            target: "lanewar_bot::controller",
            Level::DEBUG,
            round = result.round,
            one_lane = %result.side_one.lane,
            one_card = %result.side_one.card,
            two_lane = %result.side_two.lane,
            two_card = %result.side_two.card,
            cards_remaining = result.cards_remaining,
            game_over = self.state.is_game_over(),
        );
    }
}
