//! Kind- and class-specific stat profiles.
//!
//! Consolidates per-kind enemy parameters and per-class player parameters
//! into data tables so behavior code matches on data, not on type names.

use horde_core::enums::{CharacterClass, EnemyKind};

/// Ranged volley parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolleyProfile {
    /// Projectiles per volley.
    pub shots: u32,
    /// Telegraph length per shot (s).
    pub telegraph_secs: f64,
    /// Delay between successive shots (s).
    pub stagger_secs: f64,
    /// Angle between adjacent shots around the player (rad).
    pub spread_rad: f64,
    /// Cooldown after starting a volley (s).
    pub cooldown_secs: f64,
    /// Projectile speed (units/s).
    pub projectile_speed: f64,
    /// Projectile collision radius.
    pub projectile_size: f64,
}

/// Standalone clustering slot around the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterSlot {
    /// Distance from the player.
    pub distance: f64,
    /// Angular spread per nearby ally (rad).
    pub spread_per_ally: f64,
}

/// Base stats and behavior parameters for one enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub max_hp: i32,
    pub attack_power: i32,
    pub speed: f64,
    pub radius: f64,
    pub exp_value: u32,
    pub attack_range: f64,
    /// Kiting distance (0 for melee).
    pub preferred_distance: f64,
    pub cluster: ClusterSlot,
    /// Present for ranged kinds only.
    pub volley: Option<VolleyProfile>,
}

/// Get the stat profile for a given enemy kind.
pub fn get_profile(kind: EnemyKind) -> EnemyProfile {
    match kind {
        EnemyKind::Crawler => EnemyProfile {
            max_hp: 30,
            attack_power: 8,
            speed: 90.0,
            radius: 10.0,
            exp_value: 10,
            attack_range: 25.0,
            preferred_distance: 0.0,
            cluster: ClusterSlot {
                distance: 80.0,
                spread_per_ally: 0.4,
            },
            volley: None,
        },
        EnemyKind::Brute => EnemyProfile {
            max_hp: 90,
            attack_power: 18,
            speed: 55.0,
            radius: 16.0,
            exp_value: 25,
            attack_range: 32.0,
            preferred_distance: 0.0,
            cluster: ClusterSlot {
                distance: 60.0,
                spread_per_ally: 0.3,
            },
            volley: None,
        },
        EnemyKind::Sniper => EnemyProfile {
            max_hp: 40,
            attack_power: 20,
            speed: 60.0,
            radius: 11.0,
            exp_value: 30,
            attack_range: 350.0,
            preferred_distance: 250.0,
            cluster: ClusterSlot {
                distance: 160.0,
                spread_per_ally: 0.6,
            },
            volley: Some(VolleyProfile {
                shots: 1,
                telegraph_secs: 1.2,
                stagger_secs: 0.0,
                spread_rad: 0.0,
                cooldown_secs: 2.5,
                projectile_speed: 400.0,
                projectile_size: 3.0,
            }),
        },
        EnemyKind::FireShooter => EnemyProfile {
            max_hp: 55,
            attack_power: 10,
            speed: 70.0,
            radius: 12.0,
            exp_value: 25,
            attack_range: 200.0,
            preferred_distance: 120.0,
            cluster: ClusterSlot {
                distance: 160.0,
                spread_per_ally: 0.6,
            },
            volley: Some(VolleyProfile {
                shots: 3,
                telegraph_secs: 0.6,
                stagger_secs: 0.1,
                spread_rad: 0.25,
                cooldown_secs: 2.0,
                projectile_speed: 250.0,
                projectile_size: 5.0,
            }),
        },
    }
}

/// Base stats for a player class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProfile {
    pub max_hp: i32,
    pub attack_power: i32,
    pub speed: f64,
    pub attack_range: f64,
    /// Seconds between swings.
    pub attack_interval: f64,
}

/// Get the stat profile for a player class.
pub fn get_class_profile(class: CharacterClass) -> ClassProfile {
    match class {
        CharacterClass::Survivor => ClassProfile {
            max_hp: 100,
            attack_power: 25,
            speed: 200.0,
            attack_range: 60.0,
            attack_interval: 0.5,
        },
        CharacterClass::Warrior => ClassProfile {
            max_hp: 150,
            attack_power: 35,
            speed: 180.0,
            attack_range: 70.0,
            attack_interval: 0.4,
        },
        CharacterClass::Mage => ClassProfile {
            max_hp: 80,
            attack_power: 30,
            speed: 220.0,
            attack_range: 120.0,
            attack_interval: 0.3,
        },
        CharacterClass::FireShooter => ClassProfile {
            max_hp: 110,
            attack_power: 20,
            speed: 210.0,
            attack_range: 100.0,
            attack_interval: 0.2,
        },
    }
}
