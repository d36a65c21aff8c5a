// selene_core/src/error.rs

use thiserror::Error;

/// Everything that can go wrong while building an HMM or running inference on it.
///
/// None of these are retried: they mean the caller handed in an invalid model
/// or evidence that the model considers impossible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HmmError {
    /// Invalid grid, sensor parameters, alphabet or matrix shapes.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A belief vector summed to zero: the observations cannot have been
    /// produced by the model.
    #[error("belief at time step {time_step} sums to zero; the observations are impossible under this model")]
    DegenerateDistribution { time_step: usize },

    /// Viterbi decoding has no terminal state to backtrack from.
    #[error("cannot decode a state path from an empty observation sequence")]
    EmptyObservation,
}

impl HmmError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        HmmError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, HmmError>;
