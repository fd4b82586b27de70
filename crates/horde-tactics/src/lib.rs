//! Enemy tactical AI for HORDE.
//!
//! Implements formation selection and layout, role assignment, the
//! formation coordinator, the per-enemy tactical dispatcher, wave
//! composition and pacing, and combat resolution helpers.
//! No ECS dependency: everything operates on plain data.

pub mod combat;
pub mod coordinator;
pub mod dispatcher;
pub mod formation;
pub mod player;
pub mod profiles;
pub mod roles;
pub mod waves;

pub use horde_core as core;
