//! Combat AI for armed NPCs.
//!
//! Implements weapon-family strategies, two-tier aim inaccuracy and the
//! per-entity attack controller. No ECS dependency: operates on plain data
//! and host capability traits.

pub mod capabilities;
pub mod controller;
pub mod identity;
pub mod inaccuracy;
pub mod profiles;
pub mod selector;
pub mod strategy;

pub use sidearm_core as core;
