// selene_core/src/lib.rs

//! Hidden Markov Model localization on discrete grids.
//!
//! A [`grid::Grid`] is resolved into a [`topology::Topology`], from which a
//! [`models::GridModel`] derives the transition matrix and one observation
//! matrix per sensor symbol. The [`estimation::InferenceEngine`] runs forward
//! filtering, forward-backward smoothing and Viterbi decoding over any
//! [`models::ModelProvider`]; [`scenario::ScenarioGenerator`] produces random
//! walks and sensor readings to drive it.

pub mod error;
pub mod estimation;
pub mod grid;
pub mod models;
pub mod prelude;
pub mod scenario;
pub mod topology;
pub mod types;
