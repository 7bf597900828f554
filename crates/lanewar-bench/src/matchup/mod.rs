mod pairings;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use crate::config::{AgentConfig, BenchmarkConfig, ResolvedOutputs};
use crate::logging::telemetry_path;
use lanewar_bot::{Difficulty, ParseDifficultyError, Policy, PolicyParams, Seat, play_seats};
use lanewar_core::game::outcome::Outcome;
use lanewar_core::game::state::GameState;
use lanewar_core::model::lane::Lane;
use lanewar_core::model::ruleset::{Ruleset, RulesetError};
use lanewar_core::model::side::Side;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

pub use pairings::Pairings;

/// Plays every ordered pairing of the configured agents over a shared set
/// of seeded deals.
pub struct MatchupRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    ruleset: Ruleset,
    agents: Vec<AgentBlueprint>,
    pairings: Pairings,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_per_pairing: usize,
    pub pairings: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub plot_path: Option<PathBuf>,
    pub telemetry_path: Option<PathBuf>,
}

impl MatchupRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let ruleset = config.games.ruleset()?;
        let agents = AgentBlueprint::from_configs(&config.agents)?;
        if agents.is_empty() {
            return Err(RunnerError::NoAgents);
        }
        let pairings = Pairings::new(agents.len());

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            ruleset,
            agents,
            pairings,
        })
    }

    /// Play every game, streaming one JSONL row per game to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;
        if !self.outputs.plots_dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.outputs.plots_dir)?;
        }

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new(&self.config);

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();

            for &(one, two) in self.pairings.as_slice() {
                let outcome = self.play_game(game_seed, one, two);
                analytics.record_game(one, two, outcome.outcome)?;
                write_game_row(&mut writer, &self.config, game_index, game_seed, &outcome)?;
                rows_written += 1;

                if self.logging_enabled && tracing::enabled!(Level::INFO) {
                    event!(
                        target: "lanewar_bench::game",
                        Level::INFO,
                        run_id = %self.config.run_id,
                        game_index = game_index as u32,
                        side_one = %outcome.side_one,
                        side_two = %outcome.side_two,
                        outcome = %outcome.outcome,
                        lanes_won_one = outcome.lanes_won[0],
                        lanes_won_two = outcome.lanes_won[1],
                        elapsed_ms = outcome.elapsed_ms
                    );
                }
            }
        }

        writer.flush()?;

        let summary = analytics.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;
        let plot_path = match summary.render_plot(&self.outputs.plots_dir) {
            Ok(path) => Some(path),
            Err(err) => {
                eprintln!("WARN: {}", err);
                None
            }
        };

        let telemetry_path = self
            .logging_enabled
            .then(|| telemetry_path(&self.outputs));

        Ok(RunSummary {
            games_per_pairing: self.config.games.count,
            pairings: self.pairings.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            plot_path,
            telemetry_path,
        })
    }

    /// Every pairing of one game index is dealt from the same `game_seed`.
    fn play_game(&self, game_seed: u64, one: usize, two: usize) -> GameOutcome {
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(game_seed);
        let mut state = GameState::deal(self.ruleset.clone(), &mut rng);

        let (agent_one, agent_two) = (&self.agents[one], &self.agents[two]);
        let mut policy_one = agent_one.spawn_policy();
        let mut policy_two = agent_two.spawn_policy();
        let rounds = play_seats(
            &mut state,
            Seat::new(policy_one.as_mut(), &agent_one.params),
            Seat::new(policy_two.as_mut(), &agent_two.params),
            &mut rng,
        );

        let ledger = state.ledger();
        let lanes = Lane::ALL.map(|lane| LaneRow {
            lane,
            one: ledger.score(lane, Side::One),
            two: ledger.score(lane, Side::Two),
        });

        GameOutcome {
            side_one: agent_one.name.clone(),
            side_two: agent_two.name.clone(),
            outcome: Outcome::from_ledger(ledger),
            lanes_won: Side::BOTH.map(|side| ledger.lanes_won(side)),
            lanes,
            rounds: rounds.len(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    game_index: usize,
    game_seed: u64,
    outcome: &GameOutcome,
) -> Result<(), RunnerError> {
    let row = GameLogRow {
        run_id: config.run_id.clone(),
        game_id: format!("G{game_index:05}_{}_vs_{}", outcome.side_one, outcome.side_two),
        game_index,
        game_seed,
        ruleset: config.games.ruleset.clone(),
        side_one: outcome.side_one.clone(),
        side_two: outcome.side_two.clone(),
        outcome: outcome.outcome,
        lanes_won: outcome.lanes_won,
        lanes: outcome.lanes,
        rounds: outcome.rounds,
        elapsed_ms: outcome.elapsed_ms,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

struct GameOutcome {
    side_one: String,
    side_two: String,
    /// From side one's point of view.
    outcome: Outcome,
    lanes_won: [usize; 2],
    lanes: [LaneRow; 3],
    rounds: usize,
    elapsed_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct LaneRow {
    lane: Lane,
    one: i32,
    two: i32,
}

#[derive(Serialize)]
struct GameLogRow {
    run_id: String,
    game_id: String,
    game_index: usize,
    game_seed: u64,
    ruleset: String,
    side_one: String,
    side_two: String,
    outcome: Outcome,
    lanes_won: [usize; 2],
    lanes: [LaneRow; 3],
    rounds: usize,
    elapsed_ms: f64,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("invalid difficulty for agent '{name}': {source}")]
    Agent {
        name: String,
        #[source]
        source: ParseDifficultyError,
    },
    #[error(transparent)]
    Ruleset(#[from] RulesetError),
    #[error("configuration lists no agents")]
    NoAgents,
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

struct AgentBlueprint {
    name: String,
    difficulty: Difficulty,
    params: PolicyParams,
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, RunnerError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, RunnerError> {
        let difficulty = config.difficulty().map_err(|source| RunnerError::Agent {
            name: config.name.clone(),
            source,
        })?;
        Ok(Self {
            name: config.name.clone(),
            difficulty,
            params: config.policy_params(),
        })
    }

    fn spawn_policy(&self) -> Box<dyn Policy> {
        self.difficulty.policy()
    }
}
