//! Headless runner for HORDE.
//!
//! Loads an `EngineConfig`, drives the simulation with a scripted pilot,
//! optionally streams snapshots as JSON lines, and records the finished
//! run in the save store.

pub mod cli;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod logs;
pub mod pilot;

pub use error::AppError;

#[cfg(test)]
mod tests;
