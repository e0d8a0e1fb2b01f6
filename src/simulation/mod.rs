//! Simulation driver - the deterministic tick transform

pub mod tick;

pub use tick::{advance, run_tick};
