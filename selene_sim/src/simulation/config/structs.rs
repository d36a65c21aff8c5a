// selene_sim/src/simulation/config/structs.rs

use selene_core::models::SensorParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ScenarioConfig
/// Everything needed for one localization run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    pub maze: MazeConfig,

    #[serde(default)] // Use default if the [sensor] section is missing
    pub sensor: SensorParams,

    #[serde(default)]
    pub run: RunConfig,
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in a scenario.toml file.
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MazeConfig {
    /// Path to the maze text file. Relative paths resolve against the
    /// directory holding the scenario file.
    pub file: PathBuf,
    /// The sensor's labels, in symbol order.
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
    /// The character marking a blocked cell.
    #[serde(default = "default_wall")]
    pub wall: char,
}

fn default_alphabet() -> String {
    "rgby".to_string()
}

fn default_wall() -> char {
    'X'
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)] // Every field of [run] is optional
pub struct RunConfig {
    /// Number of cells the agent visits (one observation each).
    pub steps: usize,
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Whether the sensor makes mistakes while generating observations.
    pub noisy: bool,
    /// Which inference procedures to run.
    pub algorithms: Vec<Algorithm>,
    /// Print the belief grid of every time step.
    pub report: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 20,
            seed: None,
            noisy: true,
            algorithms: vec![Algorithm::Filter, Algorithm::Smooth, Algorithm::Viterbi],
            report: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Filter,
    Smooth,
    Viterbi,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Filter => "filter",
            Algorithm::Smooth => "smooth",
            Algorithm::Viterbi => "viterbi",
        };
        f.write_str(name)
    }
}
