// selene_core/src/estimation/mod.rs

use crate::error::Result;
use crate::types::Symbol;

/// The contract for any algorithm that tracks the agent's location online,
/// one observation at a time.
pub trait StateEstimator: Send + Sync {
    /// Folds one observation into the estimate and returns the new belief.
    /// On error the previous belief is kept.
    fn process(&mut self, observation: Symbol) -> Result<&Belief>;

    /// Returns a reference to the current best estimate of the state.
    fn get_belief(&self) -> &Belief;

    /// Forgets all evidence and goes back to the prior.
    fn reset(&mut self);
}

pub mod belief;
pub mod engine;
pub mod filters;
pub mod forward_backward;
pub mod viterbi;

pub use belief::Belief;
pub use engine::InferenceEngine;
pub use filters::ForwardFilter;
