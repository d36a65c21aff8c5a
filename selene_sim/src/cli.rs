// selene_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

use crate::simulation::config::ScenarioConfig;

/// Selene: HMM localization of a robot on a colored grid.
///
/// This struct defines the command-line arguments accepted by the `selene`
/// binary. Anything given here overrides the scenario file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/default.toml")]
    pub scenario: PathBuf,

    /// Seed for the random walk and sensor noise.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of cells the agent visits.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Report the true label of every cell.
    #[arg(long, default_value_t = false)]
    pub noise_free: bool,

    /// Print the belief grid of every time step.
    #[arg(long, default_value_t = false)]
    pub report: bool,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut ScenarioConfig) {
        if let Some(seed) = self.seed {
            config.run.seed = Some(seed);
        }
        if let Some(steps) = self.steps {
            config.run.steps = steps;
        }
        if self.noise_free {
            config.run.noisy = false;
        }
        if self.report {
            config.run.report = true;
        }
    }
}
