use std::path::PathBuf;

use clap::Parser;

use lanewar_bench::config::{BenchmarkConfig, ResolvedOutputs};
use lanewar_bench::logging::init_logging;
use lanewar_bench::matchup::MatchupRunner;
use lanewar_core::AppInfo;

/// Headless matchup harness for the lane-war policies.
#[derive(Debug, Parser)]
#[command(
    name = "lanewar-bench",
    author,
    version,
    about = "Deterministic lane-war win-rate matrix"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games each pairing plays.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let agent_count = config.agents.len();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let ruleset = config.games.ruleset.clone();

    println!(
        "{} {} ({}): loaded '{run_id}' with {agent_count} agent{} ({games} games per pairing, {ruleset} ruleset)",
        AppInfo::name(),
        AppInfo::version(),
        AppInfo::codename(),
        if agent_count == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = MatchupRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games × {} pairings → {} rows at {}",
        summary.games_per_pairing,
        summary.pairings,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(plot_path) = summary.plot_path.as_ref() {
        println!("Win-rate heatmap: {}", plot_path.display());
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
