//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EnemyId, Vec2};

/// Sound cues for the frontend audio system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Player swung at enemies.
    Attack { position: Vec2 },
    /// Player landed a non-lethal hit.
    EnemyHit { enemy: EnemyId, kind: EnemyKind },
    /// Player landed a lethal hit.
    EnemyDeath { enemy: EnemyId, kind: EnemyKind },
    /// Player took damage.
    PlayerDamage { amount: i32 },
    /// Player reached a new level.
    LevelUp { level: u32 },
    /// Current wave cleared.
    WaveComplete { wave: u32 },
}

impl AudioEvent {
    /// Asset name the frontend plays for this cue.
    pub fn cue_name(&self) -> &'static str {
        match self {
            AudioEvent::Attack { .. } => "attack",
            AudioEvent::EnemyHit { .. } => "enemy_hit",
            AudioEvent::EnemyDeath { .. } => "enemy_death",
            AudioEvent::PlayerDamage { .. } => "player_damage",
            AudioEvent::LevelUp { .. } => "level_up",
            AudioEvent::WaveComplete { .. } => "wave_complete",
        }
    }
}

/// Formation lifecycle changes reported by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FormationEvent {
    Formed {
        style: FormationStyle,
        members: Vec<EnemyId>,
    },
    /// Coordinated strike started; every member's cooldown drops by `cooldown_cut`.
    CoordinatedStrike {
        members: Vec<EnemyId>,
        cooldown_cut: f64,
    },
    StrikeEnded,
    Disbanded {
        style: FormationStyle,
        cooldown_secs: f64,
    },
}
