//! Arena snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{EnemyId, SimTime, Vec2, WorldBounds};

/// Complete arena state broadcast to the renderer after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub world: WorldBounds,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub indicators: Vec<IndicatorView>,
    pub projectiles: Vec<ProjectileView>,
    pub formation: Option<FormationView>,
    pub wave: WaveView,
    pub audio_events: Vec<AudioEvent>,
    pub score: ScoreView,
}

/// Player status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub class: CharacterClass,
    pub position: Vec2,
    pub radius: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub experience: u32,
    /// Experience needed for the next level.
    pub experience_to_next: u32,
    pub stat_points: u32,
    pub dashing: bool,
    /// 0..1 dash readiness (1 = ready).
    pub dash_ready: f64,
    pub damage_flash: f64,
}

/// A visible enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub radius: f64,
    pub hp: i32,
    pub max_hp: i32,
    /// Fade alpha (0 = invisible, 1 = opaque).
    pub alpha: f64,
    pub damage_flash: f64,
    pub state: AiState,
    /// Role inside the active formation, if any.
    pub formation_role: Option<FormationRole>,
}

/// Ranged attack telegraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorView {
    pub owner: EnemyId,
    pub kind: EnemyKind,
    pub target: Vec2,
    /// 0..1 telegraph completion.
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub size: f64,
}

/// The active formation, if one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationView {
    pub style: FormationStyle,
    pub members: u32,
    pub coordinated: bool,
    pub disband_in_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    /// Enemies still waiting to spawn.
    pub pending: u32,
    pub living: u32,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub waves_cleared: u32,
    pub damage_taken: u32,
    pub run_time_secs: f64,
}
