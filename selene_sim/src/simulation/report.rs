// selene_sim/src/simulation/report.rs

//! Text rendering of beliefs and run summaries.

use selene_core::prelude::{Belief, Location, State, Topology};
use std::fmt;

use crate::simulation::config::Algorithm;

/// Fraction of time steps where the estimate matches the true state.
/// Only the overlapping prefix is compared; an empty truth scores 1.
pub fn accuracy(estimates: &[State], truth: &[State]) -> f64 {
    if truth.is_empty() {
        return 1.0;
    }
    let hits = estimates
        .iter()
        .zip(truth)
        .filter(|(estimate, actual)| estimate == actual)
        .count();
    hits as f64 / truth.len() as f64
}

// --- Belief Grid ---

/// A belief laid out on its maze, north at the top.
///
/// Walls print as `####`. The true cell, if given, is marked with `*`.
pub struct BeliefGrid<'a> {
    topology: &'a Topology,
    belief: &'a Belief,
    observed: Option<char>,
    truth: Option<State>,
}

impl<'a> BeliefGrid<'a> {
    pub fn new(topology: &'a Topology, belief: &'a Belief) -> Self {
        Self {
            topology,
            belief,
            observed: None,
            truth: None,
        }
    }

    pub fn with_observation(mut self, label: char) -> Self {
        self.observed = Some(label);
        self
    }

    pub fn with_truth(mut self, state: State) -> Self {
        self.truth = Some(state);
        self
    }
}

impl fmt::Display for BeliefGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t = {}", self.belief.time_step)?;
        if let Some(label) = self.observed {
            write!(f, ", saw '{}'", label)?;
        }
        writeln!(f)?;

        for y in (0..self.topology.height()).rev() {
            for x in 0..self.topology.width() {
                match self.topology.state_at(x, y) {
                    Some(state) => {
                        let mark = if self.truth == Some(state) { '*' } else { ' ' };
                        write!(f, " {:.3}{}", self.belief.probability(state), mark)?;
                    }
                    None => write!(f, " ####  ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// --- Run Report ---

#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmSummary {
    pub algorithm: Algorithm,
    /// Estimated cell for each visited cell.
    pub estimates: Vec<State>,
    pub accuracy: f64,
}

/// Everything a run produced, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub seed: u64,
    pub path: Vec<Location>,
    /// Sensor readings as alphabet labels.
    pub observed: String,
    pub log_likelihood: f64,
    pub summaries: Vec<AlgorithmSummary>,
    /// Rendered belief grids, filled only when a detailed report was asked for.
    pub frames: Vec<String>,
}

impl RunReport {
    pub fn summary(&self, algorithm: Algorithm) -> Option<&AlgorithmSummary> {
        self.summaries.iter().find(|s| s.algorithm == algorithm)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            writeln!(f, "{}", frame)?;
        }
        writeln!(f, "seed:           {}", self.seed)?;
        writeln!(f, "steps:          {}", self.path.len())?;
        writeln!(f, "observed:       {}", self.observed)?;
        writeln!(f, "log likelihood: {:.4}", self.log_likelihood)?;
        for summary in &self.summaries {
            writeln!(
                f,
                "{:<8} accuracy {:>6.1}%",
                summary.algorithm.to_string(),
                summary.accuracy * 100.0
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::DVector;
    use selene_core::prelude::LabeledGrid;

    #[test]
    fn accuracy_counts_matches() {
        assert_abs_diff_eq!(accuracy(&[1, 2, 3, 4], &[1, 0, 3, 0]), 0.5);
        assert_abs_diff_eq!(accuracy(&[], &[]), 1.0);
        // A short estimate counts the missing steps as misses.
        assert_abs_diff_eq!(accuracy(&[7], &[7, 7]), 0.5);
    }

    #[test]
    fn belief_grid_prints_north_at_the_top() {
        // y=1: r X
        // y=0: g b
        let grid = LabeledGrid::from_rows(vec![vec![Some(1), Some(2)], vec![Some(0), None]]).unwrap();
        let topology = Topology::from_grid(&grid).unwrap();
        let belief =
            Belief::from_unnormalized(2, DVector::from_vec(vec![0.5, 0.25, 0.25])).unwrap();

        let text = BeliefGrid::new(&topology, &belief)
            .with_observation('g')
            .with_truth(0)
            .to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "t = 2, saw 'g'");
        assert_eq!(lines[1], " 0.250  ####  ");
        assert_eq!(lines[2], " 0.500* 0.250 ");
    }
}
