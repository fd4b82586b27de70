//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in `horde-tactics` and the engine systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EnemyId, Vec2};

/// A hostile arena unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub attack_power: i32,
    /// Movement speed (units per second).
    pub speed: f64,
    pub radius: f64,
    pub attack_range: f64,
    /// Kiting distance for ranged kinds (0 for melee).
    pub preferred_distance: f64,
    /// Experience awarded to the player on death.
    pub exp_value: u32,
    /// Seconds until the next attack is allowed (0 = ready).
    pub attack_cooldown: f64,
    /// Decaying impulse velocity (units per second).
    pub knockback: Vec2,
    /// Remaining damage flash (seconds).
    pub damage_flash: f64,
    /// Remaining fade-in (seconds). Positive while spawning.
    pub spawn_fade: f64,
    /// Remaining fade-out (seconds). Only meaningful while dying.
    pub death_fade: f64,
    pub is_dying: bool,
    /// Last decided AI state, for the render view.
    pub state: AiState,
}

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub class: CharacterClass,
    pub position: Vec2,
    pub radius: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub attack_power: i32,
    pub speed: f64,
    pub attack_range: f64,
    /// Class attack interval (seconds).
    pub attack_interval: f64,
    /// Seconds until the next attack is allowed.
    pub attack_cooldown: f64,
    pub level: u32,
    pub experience: u32,
    pub stat_points: u32,
    /// Normalized movement intent from the last Move command.
    pub move_intent: Vec2,
    /// Last non-zero movement direction (dash heading).
    pub facing: Vec2,
    pub knockback: Vec2,
    /// Knockback multiplier (lower = pushed less).
    pub knockback_resistance: f64,
    /// Remaining dash time (seconds). Invincible while positive.
    pub dash_remaining: f64,
    pub dash_cooldown: f64,
    pub dash_cooldown_max: f64,
    pub damage_flash: f64,
}

/// Formation bookkeeping for one enemy, owned by the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationMembership {
    /// Slot position the member moves toward.
    pub target: Vec2,
    pub role: FormationRole,
    /// Movement speed weight in 0..1.
    pub priority: f64,
    /// Set during the coordinated strike window.
    pub coordinated_attack: bool,
    /// Damage multiplier (1.0 outside a strike).
    pub attack_boost: f64,
}

/// Telegraph preceding a ranged shot. Tracks the player until it locks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackIndicator {
    pub owner: EnemyId,
    pub kind: EnemyKind,
    /// Time since the volley was started (seconds).
    pub elapsed: f64,
    /// Stagger before tracking begins (seconds).
    pub delay: f64,
    /// Telegraph length after the delay (seconds).
    pub duration: f64,
    /// Spread angle around the player (radians).
    pub angle_offset: f64,
    /// Current aim point.
    pub target: Vec2,
    /// Set once the indicator has locked and fired.
    pub fired: bool,
}

/// Enemy projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Collision radius.
    pub size: f64,
    pub damage: i32,
}
