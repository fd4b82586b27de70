//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Run control ---
    /// Start a new run with the chosen class.
    StartRun { class: CharacterClass },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double).
    SetTimeScale { scale: f64 },

    // --- Character ---
    /// Movement intent; normalized by the engine. (0, 0) stops.
    Move { x: f64, y: f64 },
    /// Swing at every enemy within attack range.
    Attack,
    /// Dash along the facing direction.
    Dash,
}
