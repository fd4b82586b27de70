//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fast, fragile melee swarmer.
    Crawler,
    /// Slow, heavy melee bruiser.
    Brute,
    /// Long-range single-shot marksman.
    Sniper,
    /// Mid-range triple-shot spreader.
    FireShooter,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Crawler,
        EnemyKind::Brute,
        EnemyKind::Sniper,
        EnemyKind::FireShooter,
    ];

    pub fn is_ranged(self) -> bool {
        matches!(self, EnemyKind::Sniper | EnemyKind::FireShooter)
    }

    pub fn is_melee(self) -> bool {
        !self.is_ranged()
    }
}

/// Behavioral tag of an enemy inside a formation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationRole {
    #[default]
    Default,
    /// Keeps distance and fires from behind the screen.
    Ranged,
    /// Screens ranged allies from the player.
    Protector,
    /// Covers the outer ring / flanks.
    Flanker,
    /// Front-line attacker, benefits most from coordinated strikes.
    Assault,
}

/// Geometric layout of a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationStyle {
    Surround,
    Pincer,
    Ambush,
    ProtectRanged,
    TriangleAssault,
    EncircleTrap,
    /// Staggered line in front of the player.
    Wall,
    /// V-shape with the apex pointed at the player.
    Wedge,
}

impl FormationStyle {
    /// Styles that schedule a coordinated group strike after forming.
    pub fn is_aggressive(self) -> bool {
        matches!(
            self,
            FormationStyle::TriangleAssault | FormationStyle::EncircleTrap
        )
    }
}

/// Per-enemy AI state, reported for the render view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Closing on the player or holding a standalone tactical position.
    #[default]
    Chasing,
    /// Moving to / holding a formation slot.
    InFormation,
    /// Striking or firing this tick.
    Attacking,
    /// Fading out. Absorbing: no transitions out.
    Dying,
}

/// Player character class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    #[default]
    Survivor,
    Warrior,
    Mage,
    FireShooter,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    GameOver,
}
