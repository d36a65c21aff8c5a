// selene_sim/src/prelude.rs

// Re-export the entire selene_core prelude so you can easily access
// pure types like `GridModel`, `InferenceEngine`, `Belief`, etc.
pub use selene_core::prelude::*;

// Re-export common simulation-specific types.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::config::{load_scenario, parse_scenario};
pub use crate::simulation::error::SimError;
pub use crate::simulation::maze::{Alphabet, MazeReader};
pub use crate::simulation::prng::SimulationRng;
pub use crate::simulation::report::{accuracy, AlgorithmSummary, BeliefGrid, RunReport};
pub use crate::simulation::runner::Simulation;
