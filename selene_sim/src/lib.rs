// selene_sim/src/lib.rs

//! Command-line driver for `selene_core`: loads a scenario and a maze, walks a
//! simulated agent around it and reports how well each inference procedure
//! tracked the agent.

// This prelude is for convenience for other files WITHIN the selene_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;
