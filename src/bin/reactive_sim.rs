//! Runs a reactive delivery simulation from a TOML scenario.
//!
//! ```text
//! reactive-sim --config scenario.toml --steps 2000 --behavior reactive
//! RUST_LOG=debug reactive-sim --behavior random --p-pickup 0.8
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use reactive_delivery::scenario::{BehaviorKind, Scenario, ScenarioError};

#[derive(Debug, Parser)]
#[command(name = "reactive-sim", about = "Simulate a reactive pickup and delivery agent")]
struct Args {
    /// Scenario file; the built-in Switzerland scenario when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Behavior driving the vehicle.
    #[arg(short, long, value_enum, default_value_t = BehaviorKind::Reactive)]
    behavior: BehaviorKind,

    /// Number of decisions to simulate (overrides the scenario).
    #[arg(short, long)]
    steps: Option<u32>,

    /// Seed of the task sampler (overrides the scenario).
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides the agent's discount factor.
    #[arg(long)]
    discount_factor: Option<f64>,

    /// Pickup probability of the random behavior.
    #[arg(long, default_value_t = 0.5)]
    p_pickup: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ScenarioError> {
    let mut scenario = match &args.config {
        Some(path) => {
            tracing::info!("Loading scenario from {}", path.display());
            Scenario::load(path)?
        }
        None => Scenario::default(),
    };
    if let Some(steps) = args.steps {
        scenario.simulation.steps = steps;
    }
    if let Some(seed) = args.seed {
        scenario.simulation.seed = seed;
    }
    if let Some(gamma) = args.discount_factor {
        scenario.agent.discount_factor = gamma;
    }

    let report = scenario.run(args.behavior, args.p_pickup)?;
    println!("{}", report);
    Ok(())
}
