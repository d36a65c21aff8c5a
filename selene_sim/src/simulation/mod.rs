// selene_sim/src/simulation/mod.rs

pub mod config;
pub mod error;
pub mod maze;
pub mod prng;
pub mod report;
pub mod runner;
