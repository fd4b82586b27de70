//! Player character model: movement, dash, damage intake and leveling.

use horde_core::components::Player;
use horde_core::constants::*;
use horde_core::enums::CharacterClass;
use horde_core::types::{Vec2, WorldBounds};

use crate::combat::{capped_player_knockback, decay_knockback, player_knockback_impulse};
use crate::profiles::get_class_profile;

const PLAYER_KNOCKBACK_SLOWDOWN: f64 = 250.0;
const PLAYER_KNOCKBACK_MIN_PACE: f64 = 0.3;

pub fn new_player(class: CharacterClass, position: Vec2) -> Player {
    let profile = get_class_profile(class);
    Player {
        class,
        position,
        radius: PLAYER_RADIUS,
        hp: profile.max_hp,
        max_hp: profile.max_hp,
        attack_power: profile.attack_power,
        speed: profile.speed,
        attack_range: profile.attack_range,
        attack_interval: profile.attack_interval,
        attack_cooldown: 0.0,
        level: 1,
        experience: 0,
        stat_points: 0,
        move_intent: Vec2::ZERO,
        facing: Vec2::X,
        knockback: Vec2::ZERO,
        knockback_resistance: PLAYER_KNOCKBACK_RESISTANCE,
        dash_remaining: 0.0,
        dash_cooldown: 0.0,
        dash_cooldown_max: DASH_COOLDOWN_SECS,
        damage_flash: 0.0,
    }
}

pub fn is_dashing(player: &Player) -> bool {
    player.dash_remaining > 0.0
}

pub fn is_alive(player: &Player) -> bool {
    player.hp > 0
}

/// Experience needed to leave the current level.
pub fn experience_to_next(player: &Player) -> u32 {
    player.level * EXP_PER_LEVEL
}

/// Record a movement intent; the zero vector stops the player.
pub fn set_move_intent(player: &mut Player, intent: Vec2) {
    let intent = if intent.is_finite() {
        intent.normalize_or_zero()
    } else {
        Vec2::ZERO
    };
    player.move_intent = intent;
    if intent != Vec2::ZERO {
        player.facing = intent;
    }
}

/// Start a dash along the facing direction. Returns false on cooldown.
pub fn try_dash(player: &mut Player) -> bool {
    if player.dash_cooldown > 0.0 || is_dashing(player) {
        return false;
    }
    player.dash_remaining = DASH_DURATION_SECS;
    player.dash_cooldown = player.dash_cooldown_max;
    player.knockback = Vec2::ZERO;
    true
}

/// Whether an attack may start now.
pub fn can_attack(player: &Player) -> bool {
    is_alive(player) && player.attack_cooldown <= 0.0 && !is_dashing(player)
}

/// Per-tick movement, dash, knockback and timers.
pub fn update_player(player: &mut Player, dt: f64, world: &WorldBounds) {
    let inset = player.radius;
    if is_dashing(player) {
        player.position = world.clamp(player.position + player.facing * DASH_SPEED * dt, inset);
        player.dash_remaining = (player.dash_remaining - dt).max(0.0);
    } else {
        if player.knockback != Vec2::ZERO {
            player.position = world.clamp(player.position + player.knockback * dt, inset);
            player.knockback = decay_knockback(
                player.knockback,
                PLAYER_KNOCKBACK_DECAY,
                PLAYER_KNOCKBACK_THRESHOLD,
                dt,
            );
        }
        let pace = (1.0 - player.knockback.length() / PLAYER_KNOCKBACK_SLOWDOWN)
            .max(PLAYER_KNOCKBACK_MIN_PACE);
        let step = player.move_intent * player.speed * pace * dt;
        player.position = world.clamp(player.position + step, inset);
    }

    player.attack_cooldown = (player.attack_cooldown - dt).max(0.0);
    player.dash_cooldown = (player.dash_cooldown - dt).max(0.0);
    player.damage_flash = (player.damage_flash - dt).max(0.0);
}

/// Apply damage from an attacker at `source` with `source_radius`.
///
/// Returns the damage actually taken (0 while dashing or already dead).
pub fn take_damage(player: &mut Player, amount: i32, source: Option<(Vec2, f64)>) -> i32 {
    if is_dashing(player) || !is_alive(player) || amount <= 0 {
        return 0;
    }
    let taken = amount.min(player.hp);
    player.hp -= taken;
    player.damage_flash = PLAYER_DAMAGE_FLASH_SECS;
    if let Some((position, radius)) = source {
        let impulse = player_knockback_impulse(
            player.position,
            position,
            radius,
            amount,
            player.knockback_resistance,
        );
        player.knockback = capped_player_knockback(player.knockback, impulse);
    }
    taken
}

/// Add experience and resolve level-ups. Returns the number of levels gained.
pub fn add_experience(player: &mut Player, amount: u32) -> u32 {
    player.experience += amount;
    let mut gained = 0;
    while player.experience >= experience_to_next(player) {
        player.experience -= experience_to_next(player);
        player.level += 1;
        player.stat_points += LEVEL_STAT_POINTS;
        player.max_hp += LEVEL_HP_GAIN;
        player.hp = player.max_hp;
        player.attack_power += LEVEL_ATTACK_GAIN;
        player.knockback_resistance =
            (player.knockback_resistance + LEVEL_RESISTANCE_GAIN).min(PLAYER_KNOCKBACK_RESISTANCE_MAX);
        player.dash_cooldown_max =
            (player.dash_cooldown_max - LEVEL_DASH_COOLDOWN_GAIN).max(DASH_COOLDOWN_MIN_SECS);
        gained += 1;
    }
    gained
}
