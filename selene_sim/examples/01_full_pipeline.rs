// selene_sim/examples/01_full_pipeline.rs

//! A full end-to-end localization example.
//!
//! This example demonstrates how to:
//! 1. Load a scenario from a TOML file.
//! 2. Read its maze and build the grid model.
//! 3. Generate a noisy walk and run filtering, smoothing and Viterbi over it.
//! 4. Print the smoothed belief at the last step.
//!
//! To run this example:
//! `cargo run --example 01_full_pipeline`

use selene_sim::prelude::*;
use std::fs;
use std::path::Path;

fn main() -> Result<(), SimError> {
    // --- 1. Load Scenario Configuration ---
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let scenario_path = manifest_dir.join("assets/scenarios/rooms.toml");
    let toml_string = fs::read_to_string(&scenario_path).map_err(|source| SimError::Io {
        path: scenario_path.clone(),
        source,
    })?;
    let mut config: ScenarioConfig = toml::from_str(&toml_string)
        .map_err(|e| SimError::InvalidScenario(e.to_string()))?;
    config.maze.file = manifest_dir.join("assets/scenarios").join(&config.maze.file);

    // --- 2. Build the Model ---
    let reader = MazeReader::from_config(&config.maze)?;
    let grid = reader.read_file(&config.maze.file)?;
    let simulation = Simulation::new(config, &grid, reader.alphabet.clone())?;

    // --- 3. Generate and Infer ---
    let mut rng = SimulationRng::new(Some(7));
    let generator = ScenarioGenerator::new(simulation.model());
    let scenario = generator.generate(simulation.config().run.steps, true, &mut rng);
    let engine = simulation.engine();

    let filtered = engine.filter(&scenario.observations)?;
    let smoothed = engine.smooth(&scenario.observations)?;
    let path = engine.most_likely_path(&scenario.observations)?;

    let truth = &scenario.path;
    let filter_hits: Vec<State> = filtered[1..].iter().map(Belief::most_likely_state).collect();
    let smooth_hits: Vec<State> = smoothed[1..].iter().map(Belief::most_likely_state).collect();
    println!("filter  accuracy: {:.2}", accuracy(&filter_hits, truth));
    println!("smooth  accuracy: {:.2}", accuracy(&smooth_hits, truth));
    println!("viterbi accuracy: {:.2}", accuracy(&path[1..], truth));
    println!("P(observations) = {:e}", engine.likelihood(&scenario.observations)?);

    // --- 4. Show the Final Belief ---
    if let (Some(last), Some(&state), Some(&symbol)) =
        (smoothed.last(), truth.last(), scenario.observations.last())
    {
        let grid = BeliefGrid::new(simulation.model().topology(), last)
            .with_truth(state)
            .with_observation(reader.alphabet.label_of(symbol));
        println!("\n{}", grid);
    }
    Ok(())
}
