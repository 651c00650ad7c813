//! subnet-headless: run a SUBNET simulation without a frontend.
//!
//! Usage:
//!   subnet-headless --duration-ms 60000
//!   subnet-headless --config sim.json --scenario build.json --output final.json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use subnet_core::events::SimEvent;
use subnet_core::state::GameStateSnapshot;
use subnet_sim::scenario::Scenario;
use subnet_sim::{SimConfig, SimulationEngine};

/// CLI arguments for the headless runner.
#[derive(Debug, Parser)]
#[command(name = "subnet-headless")]
#[command(about = "Run a SUBNET simulation headless and dump the final state", long_about = None)]
struct Args {
    /// JSON `SimConfig` file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON scenario of timed commands. The built-in starter network when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulated time to run (ms).
    #[arg(long, default_value = "60000")]
    duration_ms: f64,

    /// Frame length (ms).
    #[arg(long, default_value = "16")]
    frame_ms: f64,

    /// Write the final snapshot here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    if args.frame_ms.is_nan() || args.frame_ms <= 0.0 {
        anyhow::bail!("--frame-ms must be positive, got {}", args.frame_ms);
    }

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SimConfig::from_json_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    let mut scenario = match &args.scenario {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            Scenario::from_json_str(&text)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        }
        None => Scenario::starter(),
    };

    info!("subnet-headless v{}", env!("CARGO_PKG_VERSION"));
    info!(
        seed = config.seed,
        tier = %config.starting_tier,
        scenario = %scenario.name,
        "starting run"
    );

    let mut engine = SimulationEngine::new(config);
    let summary = run(&mut engine, &mut scenario, args.duration_ms, args.frame_ms);
    info!(
        ticks = summary.ticks,
        destroyed = summary.destroyed,
        rejected = summary.rejected,
        money = summary.last.economy.money,
        threat = summary.last.threat.level,
        "run complete"
    );

    let json = serde_json::to_string_pretty(&summary.last).context("serializing snapshot")?;
    match &args.output {
        Some(path) => fs::write(path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

struct RunSummary {
    ticks: u64,
    destroyed: usize,
    rejected: usize,
    last: GameStateSnapshot,
}

fn run(engine: &mut SimulationEngine, scenario: &mut Scenario, duration_ms: f64, frame_ms: f64) -> RunSummary {
    let mut summary = RunSummary {
        ticks: 0,
        destroyed: 0,
        rejected: 0,
        last: engine.snapshot(),
    };
    let mut t = 0.0;
    while t < duration_ms {
        t += frame_ms;
        engine.queue_commands(scenario.drain_due(t));
        let snap = engine.tick(t, frame_ms);
        for event in &snap.events {
            match event {
                SimEvent::NodeDestroyed { .. } => summary.destroyed += 1,
                SimEvent::CommandRejected { reason } => {
                    summary.rejected += 1;
                    warn!(%reason, "scenario command rejected");
                }
                _ => {}
            }
        }
        summary.ticks += 1;
        summary.last = snap;
    }
    summary
}
