// selene_core/src/estimation/engine.rs

use crate::error::Result;
use crate::estimation::belief::{elementwise_product, Belief};
use crate::estimation::forward_backward::{backward_pass, forward_pass, forward_step};
use crate::estimation::viterbi;
use crate::models::{validate_observations, validate_shapes, ModelProvider};
use crate::types::{State, Symbol};

/// Offline inference over a fixed model.
///
/// Every query starts from the uniform prior at time 0, allocates its own
/// belief and backpointer storage and leaves the engine untouched, so one
/// engine can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    model: Box<dyn ModelProvider>,
    prior: Belief,
}

impl InferenceEngine {
    /// Wraps a model after checking that its matrices agree in shape.
    pub fn new(model: Box<dyn ModelProvider>) -> Result<Self> {
        validate_shapes(model.as_ref())?;
        let prior = Belief::uniform(model.num_states());
        Ok(Self { model, prior })
    }

    pub fn model(&self) -> &dyn ModelProvider {
        self.model.as_ref()
    }

    /// The uniform belief every query starts from.
    pub fn initial_belief(&self) -> &Belief {
        &self.prior
    }

    /// Forward filtering: `P(state_t | obs_1..t)` for `t = 0 ..= L`.
    pub fn filter(&self, observations: &[Symbol]) -> Result<Vec<Belief>> {
        validate_observations(self.model(), observations)?;

        let mut beliefs = Vec::with_capacity(observations.len() + 1);
        beliefs.push(self.prior.clone());
        for (t, &symbol) in observations.iter().enumerate() {
            let weights = forward_step(self.model(), beliefs[t].as_vector(), symbol)?;
            beliefs.push(Belief::from_unnormalized(t + 1, weights)?);
        }
        Ok(beliefs)
    }

    /// Forward-backward smoothing: `P(state_t | obs_1..L)` for `t = 0 ..= L`.
    ///
    /// Both passes are rescaled at every step; the per-time scales drop out
    /// when each `alpha_t * beta_t` is normalized.
    pub fn smooth(&self, observations: &[Symbol]) -> Result<Vec<Belief>> {
        validate_observations(self.model(), observations)?;

        let forward = forward_pass(self.model(), self.prior.as_vector(), observations)?;
        let backward = backward_pass(self.model(), observations)?;

        forward
            .messages
            .iter()
            .zip(&backward.messages)
            .enumerate()
            .map(|(t, (alpha, beta))| Belief::from_unnormalized(t, elementwise_product(alpha, beta)))
            .collect()
    }

    /// Viterbi decoding. See [`viterbi::most_likely_path`].
    pub fn most_likely_path(&self, observations: &[Symbol]) -> Result<Vec<State>> {
        viterbi::most_likely_path(self.model(), observations)
    }

    /// `P(obs_1..L)` under the uniform prior: the sum of the final
    /// unnormalized forward message. An impossible sequence scores 0.
    pub fn likelihood(&self, observations: &[Symbol]) -> Result<f64> {
        Ok(self.log_likelihood(observations)?.exp())
    }

    /// Natural log of [`likelihood`](Self::likelihood).
    ///
    /// Computed as the sum of the log normalizers of a scaled forward pass,
    /// so long sequences do not underflow to zero.
    pub fn log_likelihood(&self, observations: &[Symbol]) -> Result<f64> {
        validate_observations(self.model(), observations)?;

        let forward = forward_pass(self.model(), self.prior.as_vector(), observations)?;
        Ok(forward.log_scale())
    }
}
