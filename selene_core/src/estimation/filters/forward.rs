// selene_core/src/estimation/filters/forward.rs

use crate::error::Result;
use crate::estimation::belief::Belief;
use crate::estimation::forward_backward::forward_step;
use crate::estimation::StateEstimator;
use crate::models::{validate_observations, validate_shapes, ModelProvider};
use crate::types::Symbol;

/// An online HMM filter: the forward recursion, one observation at a time.
///
/// After processing `obs_1..t` its belief equals `InferenceEngine::filter(obs)[t]`.
#[derive(Debug, Clone)]
pub struct ForwardFilter {
    model: Box<dyn ModelProvider>,
    belief: Belief,
}

impl ForwardFilter {
    /// Creates a filter starting from the uniform prior.
    pub fn new(model: Box<dyn ModelProvider>) -> Result<Self> {
        validate_shapes(model.as_ref())?;
        let belief = Belief::uniform(model.num_states());
        Ok(Self { model, belief })
    }
}

// --- The Public Trait Implementation ---
impl StateEstimator for ForwardFilter {
    fn process(&mut self, observation: Symbol) -> Result<&Belief> {
        validate_observations(self.model.as_ref(), &[observation])?;

        // 1. PREDICT and weight by the sensor model: O · Tᵀ · belief.
        let weights = forward_step(self.model.as_ref(), self.belief.as_vector(), observation)?;

        // 2. UPDATE: normalize into the next belief. Impossible evidence leaves
        //    the current belief in place.
        self.belief = Belief::from_unnormalized(self.belief.time_step + 1, weights)?;
        Ok(&self.belief)
    }

    fn get_belief(&self) -> &Belief {
        &self.belief
    }

    fn reset(&mut self) {
        self.belief = Belief::uniform(self.model.num_states());
    }
}
