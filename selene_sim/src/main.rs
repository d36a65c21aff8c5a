// selene_sim/src/main.rs

use clap::Parser;
use selene_sim::cli::Cli;
use selene_sim::prelude::*;
use selene_sim::simulation::config::validate;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Default to info for our crates; RUST_LOG overrides it.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("selene_sim=info,selene_core=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunReport, SimError> {
    let mut config = load_scenario(&cli.scenario)?;
    cli.apply_overrides(&mut config);
    validate(&config)?;
    let mut rng = SimulationRng::new(config.run.seed);
    let simulation = Simulation::from_config(config)?;
    simulation.run(&mut rng)
}
