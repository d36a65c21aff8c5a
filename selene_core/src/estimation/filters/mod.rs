// selene_core/src/estimation/filters/mod.rs

mod forward;

pub use forward::ForwardFilter;
