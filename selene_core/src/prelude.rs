// selene_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::StateEstimator;
pub use crate::grid::Grid;
pub use crate::models::ModelProvider;

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::error::HmmError;
pub use crate::estimation::Belief;
pub use crate::grid::LabeledGrid;
pub use crate::topology::Topology;
pub use crate::types::{Direction, Location, State, Symbol};

// --- Estimation Algorithms ---
pub use crate::estimation::{ForwardFilter, InferenceEngine};

// --- Concrete Model Implementations ---
pub use crate::models::{GridModel, MatrixModel, SensorParams};
pub use crate::scenario::{Scenario, ScenarioGenerator};
