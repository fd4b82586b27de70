//! Per-enemy tactical decisions.
//!
//! Pure function of the enemy's situation: returns the state to report,
//! the displacement for this tick and an optional attack order. The engine
//! applies the result; nothing here mutates world state.

use std::collections::BTreeMap;

use horde_core::components::FormationMembership;
use horde_core::constants::*;
use horde_core::enums::{AiState, EnemyKind, FormationRole};
use horde_core::types::{EnemyId, Vec2, WorldBounds};

use crate::formation::UnitSnapshot;
use crate::profiles::get_profile;

/// Input to the dispatcher for a single enemy.
pub struct TacticalContext<'a> {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub speed: f64,
    pub attack_range: f64,
    pub attack_cooldown: f64,
    pub attack_power: i32,
    pub preferred_distance: f64,
    pub knockback: Vec2,
    pub is_dying: bool,
    pub membership: Option<&'a FormationMembership>,
    /// Full membership table, for locating ranged allies.
    pub memberships: &'a BTreeMap<EnemyId, FormationMembership>,
    pub player: Vec2,
    /// Positions of every living enemy before anyone moved this tick.
    pub allies: &'a [UnitSnapshot],
    pub world: WorldBounds,
    pub dt: f64,
}

/// Attack the engine should carry out this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOrder {
    /// Immediate strike on the player.
    Melee { damage: i32, cooldown: f64 },
    /// Start a telegraphed volley.
    Ranged { cooldown: f64 },
}

/// Output from the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticalDecision {
    pub state: AiState,
    pub displacement: Vec2,
    pub attack: Option<AttackOrder>,
}

impl TacticalDecision {
    fn idle(state: AiState) -> Self {
        Self {
            state,
            displacement: Vec2::ZERO,
            attack: None,
        }
    }
}

const RANGED_ROLE_MOVE_FACTOR: f64 = 0.8;
const ASSAULT_MOVE_FACTOR: f64 = 1.3;
const RANGED_ROLE_RETREAT_MARGIN: f64 = 20.0;
const RANGED_ROLE_RETREAT_FACTOR: f64 = 0.6;
const PROTECT_MOVE_FACTOR: f64 = 1.2;
const PROTECT_ARRIVAL_RADIUS: f64 = 10.0;
const ASSAULT_CHARGE_FACTOR: f64 = 0.4;
const ASSAULT_COORDINATED_CHARGE_FACTOR: f64 = 0.7;
const CLUSTER_ARRIVAL_RADIUS: f64 = 20.0;
const CLUSTER_MOVE_FACTOR: f64 = 0.8;
const KITE_RETREAT_BELOW: f64 = 0.7;
const KITE_ADVANCE_ABOVE: f64 = 1.3;
const KITE_RETREAT_FACTOR: f64 = 0.8;
const KITE_ADVANCE_FACTOR: f64 = 0.6;
const KITE_STRAFE_FACTOR: f64 = 0.4;
const KNOCKBACK_SLOWDOWN: f64 = 200.0;
const KNOCKBACK_MIN_PACE: f64 = 0.3;

/// Decide what one enemy does this tick.
pub fn decide(ctx: &TacticalContext) -> TacticalDecision {
    if ctx.is_dying {
        return TacticalDecision::idle(AiState::Dying);
    }

    match ctx.membership {
        Some(membership) => formation_behavior(ctx, membership),
        None => {
            let nearby = ctx
                .allies
                .iter()
                .filter(|a| a.id != ctx.id)
                .filter(|a| a.position.distance(ctx.position) < ALLY_CLUSTER_RADIUS)
                .count();
            if nearby >= 2 {
                cluster_behavior(ctx, nearby)
            } else {
                chase_behavior(ctx)
            }
        }
    }
}

fn toward(from: Vec2, to: Vec2, step: f64) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= f64::EPSILON {
        return Vec2::ZERO;
    }
    delta / dist * step.min(dist)
}

fn can_attack(ctx: &TacticalContext) -> bool {
    ctx.attack_cooldown <= 0.0
        && ctx.world.contains(ctx.position, ATTACK_BOUNDS_BUFFER)
        && ctx.position.distance(ctx.player) <= ctx.attack_range
}

/// Standard strike for the enemy's kind, if it is in range and ready.
fn standard_attack(ctx: &TacticalContext, boost: f64, melee_cooldown: f64) -> Option<AttackOrder> {
    if !can_attack(ctx) {
        return None;
    }
    match get_profile(ctx.kind).volley {
        Some(volley) => Some(AttackOrder::Ranged {
            cooldown: volley.cooldown_secs,
        }),
        None => Some(AttackOrder::Melee {
            damage: (ctx.attack_power as f64 * boost).round() as i32,
            cooldown: melee_cooldown,
        }),
    }
}

fn with_attack(state: AiState, displacement: Vec2, attack: Option<AttackOrder>) -> TacticalDecision {
    TacticalDecision {
        state: if attack.is_some() {
            AiState::Attacking
        } else {
            state
        },
        displacement,
        attack,
    }
}

fn formation_behavior(ctx: &TacticalContext, m: &FormationMembership) -> TacticalDecision {
    let role_factor = match m.role {
        FormationRole::Assault => ASSAULT_MOVE_FACTOR,
        FormationRole::Ranged => RANGED_ROLE_MOVE_FACTOR,
        _ => 1.0,
    };
    let mut displacement = Vec2::ZERO;
    if ctx.position.distance(m.target) > FORMATION_ARRIVAL_RADIUS {
        let step = ctx.speed * m.priority * role_factor * ctx.dt;
        displacement = toward(ctx.position, m.target, step);
    }

    let to_player = ctx.player.distance(ctx.position);
    let attack = match m.role {
        FormationRole::Ranged => {
            if to_player < RANGED_ROLE_DISTANCE - RANGED_ROLE_RETREAT_MARGIN {
                let away = (ctx.position - ctx.player).try_normalize().unwrap_or(Vec2::X);
                displacement += away * ctx.speed * RANGED_ROLE_RETREAT_FACTOR * ctx.dt;
            }
            standard_attack(ctx, m.attack_boost, MELEE_ATTACK_COOLDOWN)
        }
        FormationRole::Protector => {
            if let Some(guard_point) = threatened_ranged_ally(ctx) {
                if ctx.position.distance(guard_point) > PROTECT_ARRIVAL_RADIUS {
                    let step = ctx.speed * PROTECT_MOVE_FACTOR * ctx.dt;
                    displacement = toward(ctx.position, guard_point, step);
                }
            }
            standard_attack(ctx, m.attack_boost, MELEE_ATTACK_COOLDOWN)
        }
        FormationRole::Assault => {
            let cooldown = if m.coordinated_attack {
                ASSAULT_COORDINATED_COOLDOWN
            } else {
                ASSAULT_ATTACK_COOLDOWN
            };
            if to_player > ctx.attack_range {
                let factor = if m.coordinated_attack {
                    ASSAULT_COORDINATED_CHARGE_FACTOR
                } else {
                    ASSAULT_CHARGE_FACTOR
                };
                let charge = toward(ctx.position, ctx.player, ctx.speed * factor * ctx.dt);
                displacement = if m.coordinated_attack {
                    charge
                } else {
                    displacement + charge
                };
            }
            standard_attack(ctx, m.attack_boost, cooldown)
        }
        FormationRole::Default | FormationRole::Flanker => {
            standard_attack(ctx, m.attack_boost, MELEE_ATTACK_COOLDOWN)
        }
    };

    with_attack(AiState::InFormation, displacement, attack)
}

/// Midpoint between the player and the first ranged formation ally the
/// player is crowding, if any.
fn threatened_ranged_ally(ctx: &TacticalContext) -> Option<Vec2> {
    ctx.allies
        .iter()
        .filter(|a| a.id != ctx.id)
        .filter(|a| {
            ctx.memberships
                .get(&a.id)
                .is_some_and(|m| m.role == FormationRole::Ranged)
        })
        .find(|a| a.position.distance(ctx.player) < PROTECT_THREAT_RADIUS)
        .map(|a| (a.position + ctx.player) / 2.0)
}

fn cluster_behavior(ctx: &TacticalContext, nearby: usize) -> TacticalDecision {
    let cluster = get_profile(ctx.kind).cluster;
    let offset = ctx.position - ctx.player;
    let bearing = offset.y.atan2(offset.x);
    let angle = bearing + nearby as f64 * cluster.spread_per_ally;
    let slot = ctx.player + Vec2::from_angle(angle) * cluster.distance;

    let mut displacement = Vec2::ZERO;
    if ctx.position.distance(slot) > CLUSTER_ARRIVAL_RADIUS {
        displacement = toward(ctx.position, slot, ctx.speed * CLUSTER_MOVE_FACTOR * ctx.dt);
    }
    let attack = standard_attack(ctx, 1.0, MELEE_ATTACK_COOLDOWN);
    with_attack(AiState::Chasing, displacement, attack)
}

fn chase_behavior(ctx: &TacticalContext) -> TacticalDecision {
    let delta = ctx.player - ctx.position;
    let distance = delta.length();
    let unit = delta.try_normalize().unwrap_or(Vec2::ZERO);
    let pace = (1.0 - ctx.knockback.length() / KNOCKBACK_SLOWDOWN).max(KNOCKBACK_MIN_PACE);
    let step = ctx.speed * pace * ctx.dt;

    if ctx.kind.is_melee() {
        if distance > ctx.attack_range {
            let target = clamp_inside(ctx.world, ctx.position, ctx.position + unit * step, 0.0);
            return TacticalDecision {
                state: AiState::Chasing,
                displacement: target - ctx.position,
                attack: None,
            };
        }
        let attack = standard_attack(ctx, 1.0, MELEE_ATTACK_COOLDOWN);
        return with_attack(AiState::Chasing, Vec2::ZERO, attack);
    }

    let preferred = ctx.preferred_distance;
    let movement = if distance < preferred * KITE_RETREAT_BELOW {
        -unit * step * KITE_RETREAT_FACTOR
    } else if distance > preferred * KITE_ADVANCE_ABOVE {
        unit * step * KITE_ADVANCE_FACTOR
    } else {
        unit.perp() * step * KITE_STRAFE_FACTOR
    };
    let target = clamp_inside(ctx.world, ctx.position, ctx.position + movement, RANGED_WALL_INSET);
    let attack = standard_attack(ctx, 1.0, MELEE_ATTACK_COOLDOWN);
    with_attack(AiState::Chasing, target - ctx.position, attack)
}

/// Keep `next` inside the world shrunk by `inset` once `current` is inside
/// the world. An enemy already in the inset band may move inward but never
/// further out, so spawns walk in instead of snapping.
fn clamp_inside(world: WorldBounds, current: Vec2, next: Vec2, inset: f64) -> Vec2 {
    if !world.contains(current, 0.0) {
        return next;
    }
    let axis = |value: f64, at: f64, extent: f64| {
        let lo = inset.min(at);
        let hi = (extent - inset).max(at).max(lo);
        value.clamp(lo, hi)
    };
    Vec2::new(
        axis(next.x, current.x, world.width),
        axis(next.y, current.y, world.height),
    )
}
