//! Simulation engine for HORDE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces ArenaSnapshots for the frontend.

pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{EngineConfig, SimulationEngine};
pub use horde_core as core;
