// selene_sim/src/simulation/runner.rs

use selene_core::prelude::{Belief, Grid, GridModel, InferenceEngine, ScenarioGenerator, State};
use tracing::{debug, info};

use crate::simulation::config::{Algorithm, ScenarioConfig};
use crate::simulation::error::SimError;
use crate::simulation::maze::{Alphabet, MazeReader};
use crate::simulation::prng::SimulationRng;
use crate::simulation::report::{accuracy, AlgorithmSummary, BeliefGrid, RunReport};

/// One maze, its model and the engine that runs inference over it.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: ScenarioConfig,
    alphabet: Alphabet,
    model: GridModel,
    engine: InferenceEngine,
}

impl Simulation {
    /// Reads the maze named by `config` and builds the model.
    pub fn from_config(config: ScenarioConfig) -> Result<Self, SimError> {
        let reader = MazeReader::from_config(&config.maze)?;
        let grid = reader.read_file(&config.maze.file)?;
        Self::new(config, &grid, reader.alphabet)
    }

    /// Builds the model for `grid`. The sensor reports one symbol per
    /// alphabet label, whatever `sensor.num_symbols` says.
    pub fn new(
        mut config: ScenarioConfig,
        grid: &dyn Grid,
        alphabet: Alphabet,
    ) -> Result<Self, SimError> {
        if config.sensor.num_symbols != alphabet.len() {
            debug!(
                "Alphabet has {} labels, overriding sensor.num_symbols = {}",
                alphabet.len(),
                config.sensor.num_symbols
            );
            config.sensor.num_symbols = alphabet.len();
        }

        let model = GridModel::build(grid, config.sensor)?;
        info!(
            "Built {}x{} grid model with {} states and {} symbols",
            grid.width(),
            grid.height(),
            model.topology().num_states(),
            alphabet.len()
        );
        let engine = InferenceEngine::new(Box::new(model.clone()))?;
        Ok(Self {
            config,
            alphabet,
            model,
            engine,
        })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Generates a walk, runs the configured algorithms over its
    /// observations and scores each against the true path.
    pub fn run(&self, rng: &mut SimulationRng) -> Result<RunReport, SimError> {
        let run = &self.config.run;
        let generator = ScenarioGenerator::new(&self.model);
        let scenario = generator.generate(run.steps, run.noisy, rng);
        let obs = &scenario.observations;
        let observed: String = obs.iter().map(|&s| self.alphabet.label_of(s)).collect();
        info!(
            "Generated {} step walk (seed {}, noisy: {}): {}",
            run.steps,
            rng.seed(),
            run.noisy,
            observed
        );

        let log_likelihood = self.engine.log_likelihood(obs)?;
        debug!("log P(observations) = {:.4}", log_likelihood);

        let mut summaries = Vec::with_capacity(run.algorithms.len());
        let mut frames = Vec::new();
        for &algorithm in &run.algorithms {
            // Index 0 of every result is time 0, before the first observation.
            let estimates: Vec<State> = match algorithm {
                Algorithm::Filter => {
                    let beliefs = self.engine.filter(obs)?;
                    self.map_estimates(algorithm, &beliefs, &scenario.path, &observed, &mut frames)
                }
                Algorithm::Smooth => {
                    let beliefs = self.engine.smooth(obs)?;
                    self.map_estimates(algorithm, &beliefs, &scenario.path, &observed, &mut frames)
                }
                Algorithm::Viterbi => self.engine.most_likely_path(obs)?[1..].to_vec(),
            };

            let score = accuracy(&estimates, &scenario.path);
            info!("{} accuracy: {:.1}%", algorithm, score * 100.0);
            summaries.push(AlgorithmSummary {
                algorithm,
                estimates,
                accuracy: score,
            });
        }

        Ok(RunReport {
            seed: rng.seed(),
            path: generator.locations(&scenario.path),
            observed,
            log_likelihood,
            summaries,
            frames,
        })
    }

    /// The most likely state of every belief after time 0, rendering the
    /// beliefs into `frames` when a detailed report is on.
    fn map_estimates(
        &self,
        algorithm: Algorithm,
        beliefs: &[Belief],
        path: &[State],
        observed: &str,
        frames: &mut Vec<String>,
    ) -> Vec<State> {
        let beliefs = &beliefs[1..];
        if self.config.run.report {
            frames.push(format!("== {} ==", algorithm));
            frames.extend(beliefs.iter().zip(path).zip(observed.chars()).map(
                |((belief, &truth), label)| {
                    BeliefGrid::new(self.model.topology(), belief)
                        .with_truth(truth)
                        .with_observation(label)
                        .to_string()
                },
            ));
        }
        beliefs.iter().map(Belief::most_likely_state).collect()
    }
}
