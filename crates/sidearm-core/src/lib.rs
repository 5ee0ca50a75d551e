//! Core types and definitions for the SIDEARM combat AI.
//!
//! This crate defines the vocabulary shared across all other crates:
//! weapon identities, item handles, tuning constants, configuration,
//! components, host commands, combat events and snapshot views.
//! It has no dependency on any simulation runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
