// selene_core/src/models/mod.rs

use crate::error::{HmmError, Result};
use crate::types::Symbol;
use dyn_clone::DynClone;
use nalgebra::{DMatrix, DVector};
use std::fmt::Debug;

// --- MODEL PROVIDER TRAIT ---
// Supplies the two probability models every inference procedure needs.
// `T[i][j] = P(state_t = j | state_t-1 = i)` and `O_k[i][i] = P(observe k | state = i)`.
pub trait ModelProvider: DynClone + Debug + Send + Sync {
    /// `N`, the number of hidden states.
    fn num_states(&self) -> usize {
        self.transition_matrix().nrows()
    }

    /// `K`, the number of observable symbols.
    fn num_symbols(&self) -> usize;

    /// The `N x N` row-stochastic transition matrix.
    fn transition_matrix(&self) -> &DMatrix<f64>;

    /// The diagonal `N x N` observation matrix for `symbol`.
    ///
    /// Returns `HmmError::Configuration` if `symbol` is outside the alphabet.
    fn observation_matrix(&self, symbol: Symbol) -> Result<&DMatrix<f64>>;

    /// The diagonal of `O_symbol` as a vector: the likelihood of `symbol` in each state.
    fn emission_likelihoods(&self, symbol: Symbol) -> Result<DVector<f64>> {
        Ok(self.observation_matrix(symbol)?.diagonal())
    }
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn ModelProvider>`.
dyn_clone::clone_trait_object!(ModelProvider);

/// Checks that a provider's matrices agree with each other in shape.
pub fn validate_shapes(model: &dyn ModelProvider) -> Result<()> {
    let t = model.transition_matrix();
    if t.nrows() == 0 || !t.is_square() {
        return Err(HmmError::config(format!(
            "transition matrix must be square and non-empty, got {}x{}",
            t.nrows(),
            t.ncols()
        )));
    }
    let n = t.nrows();
    if model.num_states() != n {
        return Err(HmmError::config(format!(
            "model reports {} states but its transition matrix is {}x{}",
            model.num_states(),
            n,
            n
        )));
    }
    if model.num_symbols() == 0 {
        return Err(HmmError::config("observation alphabet is empty"));
    }
    for k in 0..model.num_symbols() {
        let o = model.observation_matrix(k)?;
        if o.shape() != (n, n) {
            return Err(HmmError::config(format!(
                "observation matrix for symbol {} is {}x{}, expected {}x{}",
                k,
                o.nrows(),
                o.ncols(),
                n,
                n
            )));
        }
    }
    Ok(())
}

/// Rejects observation sequences containing symbols the model has no matrix for.
pub fn validate_observations(model: &dyn ModelProvider, observations: &[Symbol]) -> Result<()> {
    match observations
        .iter()
        .position(|&s| s >= model.num_symbols())
    {
        Some(t) => Err(HmmError::config(format!(
            "observation {} at index {} is outside the alphabet of {} symbols",
            observations[t],
            t,
            model.num_symbols()
        ))),
        None => Ok(()),
    }
}

pub(crate) fn symbol_out_of_range(symbol: Symbol, num_symbols: usize) -> HmmError {
    HmmError::config(format!(
        "symbol {} is outside the alphabet of {} symbols",
        symbol, num_symbols
    ))
}

pub mod grid;
pub mod matrix;
pub mod sensor;

pub use grid::GridModel;
pub use matrix::MatrixModel;
pub use sensor::SensorParams;
