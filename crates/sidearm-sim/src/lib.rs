//! Headless simulation host for the SIDEARM combat AI.
//!
//! Owns the hecs ECS world, runs the attack controller and its supporting
//! systems at a fixed tick rate, and produces SimSnapshots.

pub mod armory;
pub mod engine;
pub mod host;
pub mod systems;
pub mod world_setup;

pub use sidearm_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
