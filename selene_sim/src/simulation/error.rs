// selene_sim/src/simulation/error.rs

use selene_core::error::HmmError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load scenario configuration: {0}")]
    Config(#[source] Box<figment::Error>),

    #[error("maze line {line}: {message}")]
    Maze { line: usize, message: String },

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error(transparent)]
    Hmm(#[from] HmmError),
}

impl From<figment::Error> for SimError {
    fn from(err: figment::Error) -> Self {
        SimError::Config(Box::new(err))
    }
}
