// selene_sim/src/simulation/config/mod.rs

//! This module handles loading and validating the scenario configuration
//! from disk.

pub mod structs;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::simulation::error::SimError;
pub use structs::{Algorithm, MazeConfig, RunConfig, ScenarioConfig};

/// Environment variables prefixed with this override the file, with `__`
/// separating nested keys (e.g. `SELENE_RUN__STEPS=50`).
pub const ENV_PREFIX: &str = "SELENE_";

/// Loads a scenario file, applies environment overrides and validates the result.
/// A relative `maze.file` is rewritten to be relative to the scenario's directory.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, SimError> {
    if !path.is_file() {
        return Err(SimError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "scenario file not found"),
        });
    }
    info!("Loading scenario from: {}", path.display());

    let figment = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    let mut config = extract_scenario(figment)?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    config.maze.file = resolve_relative(base_dir, &config.maze.file);
    Ok(config)
}

/// Parses a scenario from TOML text. Paths are left as written.
pub fn parse_scenario(toml: &str) -> Result<ScenarioConfig, SimError> {
    extract_scenario(Figment::new().merge(Toml::string(toml)))
}

fn extract_scenario(figment: Figment) -> Result<ScenarioConfig, SimError> {
    let config: ScenarioConfig = figment.extract()?;
    validate(&config)?;
    Ok(config)
}

/// Checks values the types alone cannot rule out.
pub fn validate(config: &ScenarioConfig) -> Result<(), SimError> {
    if config.run.steps == 0 {
        return Err(SimError::InvalidScenario(
            "run.steps must be at least 1".to_string(),
        ));
    }
    if config.run.algorithms.is_empty() {
        return Err(SimError::InvalidScenario(
            "run.algorithms must name at least one of filter, smooth, viterbi".to_string(),
        ));
    }
    config.sensor.validate()?;
    Ok(())
}

fn resolve_relative(base_dir: &Path, file: &Path) -> PathBuf {
    if file.is_relative() {
        base_dir.join(file)
    } else {
        file.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let config = parse_scenario(
            r#"
            [maze]
            file = "mazes/tiny.maz"
            "#,
        )
        .unwrap();
        assert_eq!(config.maze.file, PathBuf::from("mazes/tiny.maz"));
        assert_eq!(config.maze.alphabet, "rgby");
        assert_eq!(config.maze.wall, 'X');
        assert_abs_diff_eq!(config.sensor.error_rate, 0.12);
        assert_eq!(config.run, RunConfig::default());
    }

    #[test]
    fn full_scenario_round_trips_into_structs() {
        let config = parse_scenario(
            r##"
            [maze]
            file = "/tmp/maze.maz"
            alphabet = "abc"
            wall = "#"

            [sensor]
            error_rate = 0.05

            [run]
            steps = 7
            seed = 99
            noisy = false
            algorithms = ["viterbi"]
            report = true
            "##,
        )
        .unwrap();
        assert_eq!(config.maze.wall, '#');
        assert_abs_diff_eq!(config.sensor.error_rate, 0.05);
        assert_eq!(config.run.steps, 7);
        assert_eq!(config.run.seed, Some(99));
        assert!(!config.run.noisy);
        assert_eq!(config.run.algorithms, vec![Algorithm::Viterbi]);
        assert!(config.run.report);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse_scenario(
            r#"
            [maze]
            file = "a.maz"
            colour = "red"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_rate = parse_scenario(
            r#"
            [maze]
            file = "a.maz"
            [sensor]
            error_rate = 1.0
            "#,
        );
        assert!(matches!(bad_rate, Err(SimError::Hmm(_))));

        let no_steps = parse_scenario(
            r#"
            [maze]
            file = "a.maz"
            [run]
            steps = 0
            "#,
        );
        assert!(matches!(no_steps, Err(SimError::InvalidScenario(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_scenario(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }

    #[test]
    fn bundled_scenario_resolves_its_maze() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/scenarios/default.toml");
        let config = load_scenario(&path).unwrap();
        assert!(config.maze.file.is_file(), "{}", config.maze.file.display());
    }

    #[test]
    fn environment_overrides_the_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "scenario.toml",
                r#"
                [maze]
                file = "a.maz"
                [run]
                steps = 10
                "#,
            )?;
            jail.set_env("SELENE_RUN__STEPS", 50);
            jail.set_env("SELENE_SENSOR__ERROR_RATE", 0.3);

            let config = load_scenario(Path::new("scenario.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.run.steps, 50);
            assert_abs_diff_eq!(config.sensor.error_rate, 0.3);
            assert_eq!(config.maze.file, PathBuf::from("a.maz"));
            Ok(())
        });
    }
}
