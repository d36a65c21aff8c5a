// selene_core/src/estimation/belief.rs

use crate::error::{HmmError, Result};
use crate::types::State;
use nalgebra::DVector;

/// A probability distribution over the hidden states at one time step.
///
/// Entries are non-negative and sum to 1. A belief is never mutated once
/// produced; every inference step builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Belief {
    /// The discrete time this belief refers to (`0` is the prior).
    pub time_step: usize,
    probabilities: DVector<f64>,
}

impl Belief {
    /// The uniform prior over `num_states` states at time 0.
    pub fn uniform(num_states: usize) -> Self {
        Self {
            time_step: 0,
            probabilities: DVector::from_element(num_states, 1.0 / num_states as f64),
        }
    }

    /// Normalizes `weights` into a belief at `time_step`.
    pub fn from_unnormalized(time_step: usize, weights: DVector<f64>) -> Result<Self> {
        Ok(Self {
            time_step,
            probabilities: normalize(weights, time_step)?,
        })
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn probability(&self, state: State) -> f64 {
        self.probabilities[state]
    }

    pub fn as_vector(&self) -> &DVector<f64> {
        &self.probabilities
    }

    pub fn into_vector(self) -> DVector<f64> {
        self.probabilities
    }

    /// The state with the highest probability; the lowest index wins ties.
    pub fn most_likely_state(&self) -> State {
        argmax(&self.probabilities).0
    }

    /// Pairwise product with another belief's probabilities (unnormalized).
    pub fn elementwise_product(&self, other: &DVector<f64>) -> DVector<f64> {
        elementwise_product(&self.probabilities, other)
    }
}

/// Divides every entry by the vector's sum.
///
/// A zero sum means every state was ruled out by the evidence. That is
/// reported as `DegenerateDistribution` rather than papered over.
pub fn normalize(weights: DVector<f64>, time_step: usize) -> Result<DVector<f64>> {
    let total = weights.sum();
    if !(total > 0.0) || !total.is_finite() {
        return Err(HmmError::DegenerateDistribution { time_step });
    }
    Ok(weights / total)
}

pub fn elementwise_product(a: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
    a.component_mul(b)
}

/// Index and value of the largest entry. The first maximizer wins ties.
pub(crate) fn argmax(values: &DVector<f64>) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &v) in values.iter().enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}
