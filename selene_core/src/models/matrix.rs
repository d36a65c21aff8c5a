// selene_core/src/models/matrix.rs

use crate::error::{HmmError, Result};
use crate::models::{symbol_out_of_range, validate_shapes, ModelProvider};
use crate::types::Symbol;
use nalgebra::DMatrix;

const ROW_SUM_TOLERANCE: f64 = 1e-9;

/// A model given directly as matrices rather than derived from a grid.
/// Useful for hand-built test models and for models coming from elsewhere.
#[derive(Debug, Clone)]
pub struct MatrixModel {
    transition: DMatrix<f64>,
    observations: Vec<DMatrix<f64>>,
}

impl MatrixModel {
    /// Validates and wraps a transition matrix and one diagonal observation
    /// matrix per symbol.
    pub fn new(transition: DMatrix<f64>, observations: Vec<DMatrix<f64>>) -> Result<Self> {
        let model = Self {
            transition,
            observations,
        };
        validate_shapes(&model)?;

        for (i, row) in model.transition.row_iter().enumerate() {
            if row.iter().any(|&p| !(0.0..=1.0).contains(&p)) {
                return Err(HmmError::config(format!(
                    "transition row {} has an entry outside [0, 1]",
                    i
                )));
            }
            if (row.sum() - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(HmmError::config(format!(
                    "transition row {} sums to {}, expected 1",
                    i,
                    row.sum()
                )));
            }
        }

        for (k, o) in model.observations.iter().enumerate() {
            for c in 0..o.ncols() {
                for r in 0..o.nrows() {
                    let p = o[(r, c)];
                    let valid = if r == c {
                        (0.0..=1.0).contains(&p)
                    } else {
                        p == 0.0
                    };
                    if !valid {
                        return Err(HmmError::config(format!(
                            "observation matrix {} is not a diagonal of probabilities at ({}, {})",
                            k, r, c
                        )));
                    }
                }
            }
        }

        Ok(model)
    }

    /// Builds the diagonal observation matrices from an `N x K` emission table
    /// where `emissions[(i, k)] = P(observe k | state = i)`.
    pub fn from_emissions(transition: DMatrix<f64>, emissions: &DMatrix<f64>) -> Result<Self> {
        let observations = emissions
            .column_iter()
            .map(|column| DMatrix::from_diagonal(&column.into_owned()))
            .collect();
        Self::new(transition, observations)
    }
}

impl ModelProvider for MatrixModel {
    fn num_symbols(&self) -> usize {
        self.observations.len()
    }

    fn transition_matrix(&self) -> &DMatrix<f64> {
        &self.transition
    }

    fn observation_matrix(&self, symbol: Symbol) -> Result<&DMatrix<f64>> {
        self.observations
            .get(symbol)
            .ok_or_else(|| symbol_out_of_range(symbol, self.observations.len()))
    }
}
