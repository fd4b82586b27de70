//! Combat resolution helpers.
//!
//! Damage, fades, knockback impulses and decay, the ranged attack
//! telegraph, and projectile flight. Plain functions over core components.

use horde_core::components::{AttackIndicator, Enemy, Projectile};
use horde_core::constants::*;
use horde_core::enums::{AiState, EnemyKind};
use horde_core::types::{EnemyId, Vec2, WorldBounds};

use crate::profiles::get_profile;

// --- Enemy lifecycle ---

/// Build a freshly spawned enemy with wave-scaled stats.
pub fn spawn_enemy(
    id: EnemyId,
    kind: EnemyKind,
    position: Vec2,
    max_hp: i32,
    attack_power: i32,
) -> Enemy {
    let profile = get_profile(kind);
    Enemy {
        id,
        kind,
        position,
        hp: max_hp,
        max_hp,
        attack_power,
        speed: profile.speed,
        radius: profile.radius,
        attack_range: profile.attack_range,
        preferred_distance: profile.preferred_distance,
        exp_value: profile.exp_value,
        attack_cooldown: 0.0,
        knockback: Vec2::ZERO,
        damage_flash: 0.0,
        spawn_fade: SPAWN_FADE_SECS,
        death_fade: DEATH_FADE_SECS,
        is_dying: false,
        state: AiState::Chasing,
    }
}

pub fn is_spawning(enemy: &Enemy) -> bool {
    enemy.spawn_fade > 0.0
}

/// Render alpha: fading in, fading out, or opaque.
pub fn enemy_alpha(enemy: &Enemy) -> f64 {
    if enemy.is_dying {
        (enemy.death_fade / DEATH_FADE_SECS).clamp(0.0, 1.0)
    } else if is_spawning(enemy) {
        (1.0 - enemy.spawn_fade / SPAWN_FADE_SECS).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Dying and fully faded out.
pub fn should_be_removed(enemy: &Enemy) -> bool {
    enemy.is_dying && enemy.death_fade <= 0.0
}

/// Apply damage. Returns true when this hit was lethal.
///
/// Dying enemies ignore damage. HP never drops below zero.
pub fn take_damage(enemy: &mut Enemy, amount: i32) -> bool {
    if enemy.is_dying {
        return false;
    }
    enemy.hp = (enemy.hp - amount.max(0)).max(0);
    enemy.damage_flash = ENEMY_DAMAGE_FLASH_SECS;
    if enemy.hp == 0 {
        enemy.is_dying = true;
        enemy.death_fade = DEATH_FADE_SECS;
        enemy.state = AiState::Dying;
        enemy.knockback = Vec2::ZERO;
        return true;
    }
    false
}

/// Per-tick enemy upkeep: fades, timers and knockback drift.
pub fn update_enemy(enemy: &mut Enemy, dt: f64, world: &WorldBounds) {
    if enemy.spawn_fade > 0.0 {
        enemy.spawn_fade = (enemy.spawn_fade - dt).max(0.0);
    }
    if enemy.is_dying {
        enemy.death_fade = (enemy.death_fade - dt).max(0.0);
    } else if enemy.knockback != Vec2::ZERO {
        let inset = enemy.radius + KNOCKBACK_WALL_INSET;
        enemy.position = world.clamp(enemy.position + enemy.knockback * dt, inset);
        enemy.knockback = decay_knockback(
            enemy.knockback,
            ENEMY_KNOCKBACK_DECAY,
            ENEMY_KNOCKBACK_THRESHOLD,
            dt,
        );
    }
    enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);
    enemy.damage_flash = (enemy.damage_flash - dt).max(0.0);
}

// --- Knockback ---

/// Geometric decay scaled by `dt`: `v * decay^(dt * 60)`.
///
/// Matches one frame of the per-frame factor at 60 Hz. Zeroed once every
/// component is at or below `threshold`.
pub fn decay_knockback(velocity: Vec2, decay: f64, threshold: f64, dt: f64) -> Vec2 {
    if velocity.x.abs() <= threshold && velocity.y.abs() <= threshold {
        return Vec2::ZERO;
    }
    velocity * decay.powf(dt * KNOCKBACK_REFERENCE_HZ)
}

fn cap(velocity: Vec2, max: f64) -> Vec2 {
    velocity.clamp_length_max(max)
}

/// Impulse pushing an enemy away from the player after a hit.
pub fn enemy_knockback_impulse(enemy: Vec2, player: Vec2, damage: i32) -> Vec2 {
    let offset = enemy - player;
    let distance = offset.length();
    if distance <= 0.0 {
        return Vec2::ZERO;
    }
    let force = ENEMY_KNOCKBACK_BASE * (damage as f64 / 25.0) * (60.0 / distance).max(0.5);
    offset / distance * force
}

/// Add an impulse to an enemy's knockback, capped.
pub fn apply_enemy_knockback(enemy: &mut Enemy, impulse: Vec2) {
    enemy.knockback = cap(enemy.knockback + impulse, ENEMY_KNOCKBACK_CAP);
}

/// Impulse pushing the player away from an attacker of `source_radius`.
pub fn player_knockback_impulse(
    player: Vec2,
    source: Vec2,
    source_radius: f64,
    damage: i32,
    resistance: f64,
) -> Vec2 {
    let offset = player - source;
    let distance = offset.length();
    if distance <= 0.0 {
        return Vec2::ZERO;
    }
    let force = PLAYER_KNOCKBACK_BASE
        * (source_radius / 12.0)
        * (damage as f64 / 15.0)
        * (30.0 / distance.max(1.0)).max(0.8)
        * resistance;
    offset / distance * force
}

/// Combine and cap a player knockback velocity.
pub fn capped_player_knockback(current: Vec2, impulse: Vec2) -> Vec2 {
    cap(current + impulse, PLAYER_KNOCKBACK_CAP)
}

// --- Ranged attacks ---

/// Indicators for one volley from `owner` at `player`.
pub fn plan_volley(owner: &Enemy, player: Vec2, world: &WorldBounds) -> Vec<AttackIndicator> {
    let Some(volley) = get_profile(owner.kind).volley else {
        return Vec::new();
    };
    (0..volley.shots)
        .map(|i| {
            let angle_offset = if volley.shots > 1 {
                (i as f64 - 1.0) * volley.spread_rad
            } else {
                0.0
            };
            let mut indicator = AttackIndicator {
                owner: owner.id,
                kind: owner.kind,
                elapsed: 0.0,
                delay: i as f64 * volley.stagger_secs,
                duration: volley.telegraph_secs,
                angle_offset,
                target: player,
                fired: false,
            };
            indicator.target = indicator_aim(&indicator, owner.position, player, world);
            indicator
        })
        .collect()
}

/// Aim point for an indicator: the player, offset around them for spread
/// shots, clamped near the world.
pub fn indicator_aim(
    indicator: &AttackIndicator,
    owner: Vec2,
    player: Vec2,
    world: &WorldBounds,
) -> Vec2 {
    let raw = if indicator.kind == EnemyKind::Sniper {
        player
    } else {
        let to_player = player - owner;
        let angle = to_player.y.atan2(to_player.x) + indicator.angle_offset;
        player + Vec2::from_angle(angle) * VOLLEY_SPREAD_OFFSET
    };
    let b = INDICATOR_TARGET_BUFFER;
    Vec2::new(
        raw.x.clamp(-b, world.width + b),
        raw.y.clamp(-b, world.height + b),
    )
}

/// Progress of an indicator's telegraph in 0..1 (0 while staggered).
pub fn indicator_progress(indicator: &AttackIndicator) -> f64 {
    if indicator.duration <= 0.0 {
        return 1.0;
    }
    ((indicator.elapsed - indicator.delay) / indicator.duration).clamp(0.0, 1.0)
}

/// Advance an indicator. Returns the projectile when it locks and fires.
///
/// The indicator tracks the player after its delay and locks once the
/// telegraph completes; `fired` is then set and the caller removes it.
pub fn update_indicator(
    indicator: &mut AttackIndicator,
    dt: f64,
    owner: &Enemy,
    player: Vec2,
    world: &WorldBounds,
) -> Option<Projectile> {
    if indicator.fired {
        return None;
    }
    indicator.elapsed += dt;
    if indicator.elapsed >= indicator.delay {
        indicator.target = indicator_aim(indicator, owner.position, player, world);
    }
    if indicator.elapsed >= indicator.delay + indicator.duration {
        indicator.fired = true;
        return fire_projectile(owner, indicator.target);
    }
    None
}

/// Projectile from `owner` toward `target`, or None when the target is
/// implausibly far or on top of the shooter.
pub fn fire_projectile(owner: &Enemy, target: Vec2) -> Option<Projectile> {
    let volley = get_profile(owner.kind).volley?;
    let offset = target - owner.position;
    let distance = offset.length();
    if !distance.is_finite() || distance >= PROJECTILE_REJECT_RANGE || distance < 0.1 {
        return None;
    }
    // Aim point is pulled in to max range; direction is unchanged
    let aim = if distance > PROJECTILE_MAX_RANGE {
        owner.position + offset * (PROJECTILE_MAX_RANGE / distance)
    } else {
        target
    };
    let direction = (aim - owner.position).try_normalize()?;
    Some(Projectile {
        owner: owner.id,
        kind: owner.kind,
        position: owner.position,
        velocity: direction * volley.projectile_speed,
        size: volley.projectile_size,
        damage: owner.attack_power,
    })
}

/// Result of advancing a projectile one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOutcome {
    Flying,
    /// Reached the player; the caller applies `damage`.
    Hit,
    /// Left the world margin.
    Expired,
}

pub fn update_projectile(
    projectile: &mut Projectile,
    dt: f64,
    player: Vec2,
    player_radius: f64,
    world: &WorldBounds,
) -> ProjectileOutcome {
    projectile.position += projectile.velocity * dt;
    if !projectile.position.is_finite() {
        return ProjectileOutcome::Expired;
    }
    if projectile.position.distance(player) < player_radius + projectile.size {
        return ProjectileOutcome::Hit;
    }
    if !world.contains(projectile.position, PROJECTILE_OFFWORLD_BUFFER) {
        return ProjectileOutcome::Expired;
    }
    ProjectileOutcome::Flying
}
