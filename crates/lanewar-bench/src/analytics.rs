use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use lanewar_core::game::history::{HistoryStore, MemoryHistory, Tally};
use lanewar_core::game::outcome::Outcome;
use lanewar_core::model::side::Side;
use plotters::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::BenchmarkConfig;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI
const CELL_PX: u32 = 96;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("agent index {0} is outside the configured agent list")]
    UnknownAgent(usize),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render plot: {0}")]
    Plot(String),
}

/// Accumulates side-one outcomes for every ordered pairing of agents.
pub struct AnalyticsCollector {
    run_id: String,
    ruleset: String,
    seed: Option<u64>,
    agents: Vec<(String, String)>,
    pairings: HashMap<(usize, usize), MemoryHistory>,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        Self {
            run_id: config.run_id.clone(),
            ruleset: config.games.ruleset.clone(),
            seed: config.games.seed,
            agents: config
                .agents
                .iter()
                .map(|agent| (agent.name.clone(), agent.difficulty.clone()))
                .collect(),
            pairings: HashMap::new(),
        }
    }

    /// `outcome` is from the perspective of agent `one`, who played side one.
    pub fn record_game(
        &mut self,
        one: usize,
        two: usize,
        outcome: Outcome,
    ) -> Result<(), AnalyticsError> {
        for index in [one, two] {
            if index >= self.agents.len() {
                return Err(AnalyticsError::UnknownAgent(index));
            }
        }
        self.pairings
            .entry((one, two))
            .or_insert_with(MemoryHistory::unbounded)
            .append(outcome);
        Ok(())
    }

    pub fn finalize(self) -> AnalyticsSummary {
        let n = self.agents.len();
        let mut matchups = Vec::with_capacity(n * n);
        let mut per_agent = vec![Tally::default(); n];

        for one in 0..n {
            for two in 0..n {
                let tally = self
                    .pairings
                    .get(&(one, two))
                    .map(MemoryHistory::tally)
                    .unwrap_or_default();

                if one != two {
                    if let Some(history) = self.pairings.get(&(one, two)) {
                        for outcome in history.load() {
                            per_agent[one].add(outcome.for_side(Side::One));
                            per_agent[two].add(outcome.for_side(Side::Two));
                        }
                    }
                }

                matchups.push(MatchupReport::from_tally(
                    &self.agents[one].0,
                    &self.agents[two].0,
                    tally,
                ));
            }
        }

        let agents = self
            .agents
            .into_iter()
            .zip(per_agent)
            .map(|((name, difficulty), tally)| AgentReport {
                name,
                difficulty,
                games: tally.games(),
                wins: tally.wins,
                losses: tally.losses,
                draws: tally.draws,
                win_rate: tally.win_rate(),
                ci95: wilson_interval(tally.wins, tally.games()),
            })
            .collect();

        AnalyticsSummary {
            run_id: self.run_id,
            ruleset: self.ruleset,
            seed: self.seed,
            agents,
            matchups,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchupReport {
    pub side_one: String,
    pub side_two: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
    pub ci95: (f64, f64),
    /// Two-sided test against an even 50% win rate.
    pub p_value: f64,
}

impl MatchupReport {
    fn from_tally(side_one: &str, side_two: &str, tally: Tally) -> Self {
        let games = tally.games();
        Self {
            side_one: side_one.to_string(),
            side_two: side_two.to_string(),
            games,
            wins: tally.wins,
            losses: tally.losses,
            draws: tally.draws,
            win_rate: tally.win_rate(),
            ci95: wilson_interval(tally.wins, games),
            p_value: even_split_p_value(tally.wins, games),
        }
    }
}

/// Totals over every non-mirror game an agent played, from its own seat.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub difficulty: String,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
    pub ci95: (f64, f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub ruleset: String,
    pub seed: Option<u64>,
    pub agents: Vec<AgentReport>,
    /// Row-major: side one outer, side two inner.
    pub matchups: Vec<MatchupReport>,
}

impl AnalyticsSummary {
    pub fn matchup(&self, one: usize, two: usize) -> Option<&MatchupReport> {
        let n = self.agents.len();
        if one >= n || two >= n {
            return None;
        }
        self.matchups.get(one * n + two)
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Matchup Summary\n");
        let _ = writeln!(
            out,
            "Run `{}` on the {} ruleset (seed {}).\n",
            self.run_id,
            self.ruleset,
            self.seed
                .map(|seed| seed.to_string())
                .unwrap_or_else(|| "unset".into())
        );

        let _ = writeln!(out, "## Side-one win rate\n");
        out.push_str("| Side one \\ Side two |");
        for agent in &self.agents {
            let _ = write!(out, " {} |", agent.name);
        }
        out.push_str("\n|---|");
        for _ in &self.agents {
            out.push_str("---|");
        }
        out.push('\n');
        for (one, agent) in self.agents.iter().enumerate() {
            let _ = write!(out, "| {} |", agent.name);
            for two in 0..self.agents.len() {
                match self.matchup(one, two) {
                    Some(m) if m.games > 0 => {
                        let _ = write!(
                            out,
                            " {:.1}% [{:.1}, {:.1}] |",
                            m.win_rate * 100.0,
                            m.ci95.0 * 100.0,
                            m.ci95.1 * 100.0
                        );
                    }
                    _ => out.push_str(" - |"),
                }
            }
            out.push('\n');
        }

        let _ = writeln!(out, "\n## Pairings\n");
        out.push_str("| Side one | Side two | Games | W | L | D | Win % | 95% CI | p-value |\n");
        out.push_str("|----------|----------|-------|---|---|---|-------|--------|---------|\n");
        for m in &self.matchups {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {:.1}% | [{:.3}, {:.3}] | {:.3} |",
                m.side_one,
                m.side_two,
                m.games,
                m.wins,
                m.losses,
                m.draws,
                m.win_rate * 100.0,
                m.ci95.0,
                m.ci95.1,
                m.p_value
            );
        }

        let _ = writeln!(out, "\n## Agents\n");
        out.push_str("| Agent | Difficulty | Games | W | L | D | Win % | 95% CI |\n");
        out.push_str("|-------|------------|-------|---|---|---|-------|--------|\n");
        for agent in &self.agents {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {:.1}% | [{:.3}, {:.3}] |",
                agent.name,
                agent.difficulty,
                agent.games,
                agent.wins,
                agent.losses,
                agent.draws,
                agent.win_rate * 100.0,
                agent.ci95.0,
                agent.ci95.1
            );
        }

        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }

    /// Draws the side-one win-rate matrix as a red (0%) to green (100%) grid.
    pub fn render_plot(&self, dir: impl AsRef<Path>) -> Result<PathBuf, AnalyticsError> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| AnalyticsError::Io {
                context: "creating plots directory",
                source: e,
            })?;
        }

        let n = self.agents.len();
        if n == 0 {
            return Err(AnalyticsError::Plot("no agents to plot".into()));
        }

        let output_path = dir.join("win_rate_heatmap.png");
        let rates: Vec<Option<f64>> = self
            .matchups
            .iter()
            .map(|m| (m.games > 0).then_some(m.win_rate))
            .collect();
        let side = CELL_PX * n as u32 + 20;

        let prev_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let plot_attempt = std::panic::catch_unwind(move || {
            let root = BitMapBackend::new(&output_path, (side, side)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            let grid = root.margin(10, 10, 10, 10);
            for (cell, rate) in grid.split_evenly((n, n)).iter().zip(&rates) {
                let color = rate.map(heat_color).unwrap_or(RGBColor(200, 200, 200));
                cell.fill(&color)
                    .map_err(|e| AnalyticsError::Plot(e.to_string()))?;
            }

            root.present()
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            drop(grid);
            drop(root);

            Ok(output_path)
        });

        std::panic::set_hook(prev_hook);

        match plot_attempt {
            Ok(result) => result,
            Err(_) => Err(AnalyticsError::Plot(
                "plotters panicked while rendering the heatmap".into(),
            )),
        }
    }
}

fn heat_color(rate: f64) -> RGBColor {
    let rate = rate.clamp(0.0, 1.0);
    let scale = |from: u8, to: u8, t: f64| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    if rate < 0.5 {
        let t = rate / 0.5;
        RGBColor(scale(200, 255, t), scale(40, 255, t), scale(40, 255, t))
    } else {
        let t = (rate - 0.5) / 0.5;
        RGBColor(scale(255, 40, t), scale(255, 170, t), scale(255, 60, t))
    }
}

/// Wilson score interval for `successes` out of `trials`.
pub fn wilson_interval(successes: usize, trials: usize) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 0.0);
    }
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = CONFIDENCE_Z * CONFIDENCE_Z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = CONFIDENCE_Z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
    ((center - half).max(0.0), (center + half).min(1.0))
}

/// Normal-approximation p-value for a win rate differing from 50%.
pub fn even_split_p_value(successes: usize, trials: usize) -> f64 {
    if trials == 0 {
        return 1.0;
    }
    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return 1.0;
    };
    let n = trials as f64;
    let p = successes as f64 / n;
    let z = (p - 0.5) / (0.25 / n).sqrt();
    (2.0 * (1.0 - normal.cdf(z.abs()))).clamp(0.0, 1.0)
}
