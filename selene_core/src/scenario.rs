// selene_core/src/scenario.rs

use crate::models::GridModel;
use crate::types::{Direction, Location, State, Symbol};
use rand::Rng;

/// A ground-truth walk together with what the sensor reported along it.
/// `observations[t]` was made while standing on `path[t]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub path: Vec<State>,
    pub observations: Vec<Symbol>,
}

/// Drives the agent around a grid model and simulates its sensor.
///
/// Movement uses `Topology::step`, the same rule the transition matrix is
/// built from, so generated walks are draws from the model.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioGenerator<'a> {
    model: &'a GridModel,
}

impl<'a> ScenarioGenerator<'a> {
    pub fn new(model: &'a GridModel) -> Self {
        Self { model }
    }

    /// A uniformly random walk of `len` states starting from a uniformly
    /// chosen walkable cell. Each step attempts one of the four directions.
    pub fn random_walk<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Vec<State> {
        let topology = self.model.topology();
        let mut path = Vec::with_capacity(len);
        if len == 0 {
            return path;
        }

        let mut current = rng.gen_range(0..topology.num_states());
        path.push(current);
        for _ in 1..len {
            let direction = Direction::ALL[rng.gen_range(0..Direction::COUNT)];
            current = topology.step(current, direction);
            path.push(current);
        }
        path
    }

    /// What the sensor reports along `path`.
    ///
    /// Noise-free, that is the true label of every cell. Noisy, each reading
    /// is replaced with probability `error_rate` by one of the other labels,
    /// chosen uniformly.
    pub fn observe<R: Rng + ?Sized>(&self, path: &[State], noisy: bool, rng: &mut R) -> Vec<Symbol> {
        let sensor = self.model.sensor();
        path.iter()
            .map(|&state| {
                let truth = self.model.label_of(state);
                if noisy && rng.gen::<f64>() < sensor.error_rate {
                    // Skip over the true label so every other symbol is equally likely.
                    let wrong = rng.gen_range(0..sensor.num_symbols - 1);
                    if wrong >= truth {
                        wrong + 1
                    } else {
                        wrong
                    }
                } else {
                    truth
                }
            })
            .collect()
    }

    /// A walk of `len` states and its observations.
    pub fn generate<R: Rng + ?Sized>(&self, len: usize, noisy: bool, rng: &mut R) -> Scenario {
        let path = self.random_walk(len, rng);
        let observations = self.observe(&path, noisy, rng);
        Scenario { path, observations }
    }

    /// Grid coordinates of every state on `path`.
    ///
    /// # Panics
    /// Panics if any state is `>= num_states()`.
    pub fn locations(&self, path: &[State]) -> Vec<Location> {
        path.iter()
            .map(|&state| self.model.topology().location_of(state))
            .collect()
    }
}
