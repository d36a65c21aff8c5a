// selene_core/src/models/grid.rs

use crate::error::{HmmError, Result};
use crate::grid::Grid;
use crate::models::{symbol_out_of_range, ModelProvider, SensorParams};
use crate::topology::Topology;
use crate::types::{Direction, State, Symbol};
use nalgebra::{DMatrix, DVector};

/// An HMM derived from a labeled grid and a sensor model.
///
/// Movement: each of the four directions is attempted with probability 1/4.
/// A legal attempt moves the agent to that neighbor, an illegal one leaves it
/// in place, so `T[i][i] = blocked_moves(i) / 4` and `T[i][j] = 1/4` for each
/// neighbor `j`.
///
/// Sensing: `O_k[i][i]` is `1 - error_rate` when `k` is the label of state `i`,
/// and `error_rate / (K - 1)` otherwise.
#[derive(Debug, Clone)]
pub struct GridModel {
    topology: Topology,
    /// True label of every state.
    labels: Vec<Symbol>,
    sensor: SensorParams,
    transition: DMatrix<f64>,
    observations: Vec<DMatrix<f64>>,
}

impl GridModel {
    /// Builds the topology, the transition matrix and one observation matrix per symbol.
    pub fn build(grid: &dyn Grid, sensor: SensorParams) -> Result<Self> {
        sensor.validate()?;
        let topology = Topology::from_grid(grid)?;

        let labels = (0..topology.num_states())
            .map(|state| {
                let loc = topology.location_of(state);
                match grid.label_at(loc.x, loc.y) {
                    Some(label) if label < sensor.num_symbols => Ok(label),
                    Some(label) => Err(HmmError::config(format!(
                        "cell ({}, {}) is labeled {} but the sensor only knows {} symbols",
                        loc.x, loc.y, label, sensor.num_symbols
                    ))),
                    None => Err(HmmError::config(format!(
                        "walkable cell ({}, {}) has no label",
                        loc.x, loc.y
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let transition = transition_model(&topology);
        let observations = observation_model(&labels, &sensor);

        Ok(Self {
            topology,
            labels,
            sensor,
            transition,
            observations,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn sensor(&self) -> &SensorParams {
        &self.sensor
    }

    /// The label a perfect sensor reports in `state`.
    ///
    /// # Panics
    /// Panics if `state >= num_states()`.
    pub fn label_of(&self, state: State) -> Symbol {
        self.labels[state]
    }

    pub fn labels(&self) -> &[Symbol] {
        &self.labels
    }
}

impl ModelProvider for GridModel {
    fn num_states(&self) -> usize {
        self.topology.num_states()
    }

    fn num_symbols(&self) -> usize {
        self.sensor.num_symbols
    }

    fn transition_matrix(&self) -> &DMatrix<f64> {
        &self.transition
    }

    fn observation_matrix(&self, symbol: Symbol) -> Result<&DMatrix<f64>> {
        self.observations
            .get(symbol)
            .ok_or_else(|| symbol_out_of_range(symbol, self.sensor.num_symbols))
    }
}

fn transition_model(topology: &Topology) -> DMatrix<f64> {
    let n = topology.num_states();
    let p_move = 1.0 / Direction::COUNT as f64;

    let mut t = DMatrix::zeros(n, n);
    for i in 0..n {
        t[(i, i)] = topology.blocked_moves(i) as f64 * p_move;
        for j in topology.neighbors(i) {
            t[(i, j)] += p_move;
        }
    }
    t
}

fn observation_model(labels: &[Symbol], sensor: &SensorParams) -> Vec<DMatrix<f64>> {
    let hit = sensor.hit_probability();
    let miss = sensor.miss_probability();

    (0..sensor.num_symbols)
        .map(|k| {
            let diagonal = DVector::from_iterator(
                labels.len(),
                labels.iter().map(|&label| if label == k { hit } else { miss }),
            );
            DMatrix::from_diagonal(&diagonal)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LabeledGrid;
    use approx::assert_abs_diff_eq;

    // Bottom-up:
    //   y=2: r g b y
    //   y=1: g X X b
    //   y=0: y b r g
    fn wall_maze() -> LabeledGrid {
        LabeledGrid::from_rows(vec![
            vec![Some(3), Some(2), Some(0), Some(1)],
            vec![Some(1), None, None, Some(2)],
            vec![Some(0), Some(1), Some(2), Some(3)],
        ])
        .unwrap()
    }

    #[test]
    fn transition_rows_sum_to_one() {
        let model = GridModel::build(&wall_maze(), SensorParams::default()).unwrap();
        let t = model.transition_matrix();
        assert_eq!(t.shape(), (10, 10));
        for row in t.row_iter() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn transition_follows_the_attempted_move_policy() {
        let model = GridModel::build(&wall_maze(), SensorParams::default()).unwrap();
        let topo = model.topology();
        let t = model.transition_matrix();

        // (0,0) corner: east and north are open.
        let corner = topo.state_at(0, 0).unwrap();
        assert_abs_diff_eq!(t[(corner, corner)], 0.5);
        assert_abs_diff_eq!(t[(corner, topo.state_at(1, 0).unwrap())], 0.25);
        assert_abs_diff_eq!(t[(corner, topo.state_at(0, 1).unwrap())], 0.25);

        // (1,0): west, east open; north is a wall; south is the edge.
        let s = topo.state_at(1, 0).unwrap();
        assert_abs_diff_eq!(t[(s, s)], 0.5);

        // No teleporting.
        assert_abs_diff_eq!(t[(corner, topo.state_at(3, 2).unwrap())], 0.0);
    }

    #[test]
    fn observation_columns_sum_to_one_per_state() {
        let model = GridModel::build(&wall_maze(), SensorParams::new(0.2, 4).unwrap()).unwrap();
        let n = model.num_states();
        for i in 0..n {
            let total: f64 = (0..model.num_symbols())
                .map(|k| model.observation_matrix(k).unwrap()[(i, i)])
                .sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn observation_matrices_are_diagonal() {
        let model = GridModel::build(&wall_maze(), SensorParams::new(0.2, 4).unwrap()).unwrap();
        for k in 0..4 {
            let o = model.observation_matrix(k).unwrap();
            for (r, c) in (0..o.nrows()).flat_map(|r| (0..o.ncols()).map(move |c| (r, c))) {
                let value = o[(r, c)];
                if r != c {
                    assert_eq!(value, 0.0);
                } else if model.label_of(r) == k {
                    assert_abs_diff_eq!(value, 0.8);
                } else {
                    assert_abs_diff_eq!(value, 0.2 / 3.0);
                }
            }
        }
    }

    #[test]
    fn zero_error_rate_collapses_to_indicators() {
        let model = GridModel::build(&wall_maze(), SensorParams::new(0.0, 4).unwrap()).unwrap();
        for k in 0..4 {
            let diag = model.emission_likelihoods(k).unwrap();
            for (state, &p) in diag.iter().enumerate() {
                let expected = if model.label_of(state) == k { 1.0 } else { 0.0 };
                assert_eq!(p, expected);
            }
        }
    }

    #[test]
    fn unknown_symbol_is_a_configuration_error() {
        let model = GridModel::build(&wall_maze(), SensorParams::default()).unwrap();
        assert!(matches!(
            model.observation_matrix(4),
            Err(HmmError::Configuration(_))
        ));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let grid = wall_maze();
        assert!(GridModel::build(
            &grid,
            SensorParams {
                error_rate: 1.0,
                num_symbols: 4
            }
        )
        .is_err());
        assert!(GridModel::build(
            &grid,
            SensorParams {
                error_rate: 0.1,
                num_symbols: 1
            }
        )
        .is_err());
        // Labels 2 and 3 do not fit a 2-symbol sensor.
        assert!(GridModel::build(&grid, SensorParams::new(0.1, 2).unwrap()).is_err());

        let blocked = LabeledGrid::new(1, 1, vec![None]).unwrap();
        assert!(matches!(
            GridModel::build(&blocked, SensorParams::default()),
            Err(HmmError::Configuration(_))
        ));
    }

    #[test]
    #[should_panic]
    fn label_of_an_unknown_state_panics() {
        let model = GridModel::build(&wall_maze(), SensorParams::default()).unwrap();
        model.label_of(model.num_states());
    }
}
