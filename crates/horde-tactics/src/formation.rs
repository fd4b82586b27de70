//! Formation slot layouts.
//!
//! Closed-form positions around the player for each formation style.
//! Only the ambush scatter draws from the RNG, so every layout is
//! reproducible from the seed.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use horde_core::enums::{EnemyKind, FormationRole, FormationStyle};
use horde_core::types::{EnemyId, Vec2};

/// Read-only view of one live enemy, taken before the AI moves anyone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSnapshot {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
}

/// Ranged / melee head count of a candidate group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitMix {
    pub ranged: usize,
    pub melee: usize,
}

impl UnitMix {
    pub fn of(units: &[UnitSnapshot]) -> Self {
        let ranged = units.iter().filter(|u| u.kind.is_ranged()).count();
        Self {
            ranged,
            melee: units.len() - ranged,
        }
    }

    pub fn total(&self) -> usize {
        self.ranged + self.melee
    }
}

/// One position in a formation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub position: Vec2,
    pub role: FormationRole,
    /// Higher-priority slots are filled first.
    pub priority: u8,
    pub assigned: bool,
}

impl FormationSlot {
    fn new(position: Vec2, role: FormationRole, priority: u8) -> Self {
        Self {
            position,
            role,
            priority,
            assigned: false,
        }
    }

    fn plain(position: Vec2) -> Self {
        Self::new(position, FormationRole::Default, 1)
    }
}

// Layout radii and spacings.
const SURROUND_BASE_RADIUS: f64 = 50.0;
const SURROUND_RADIUS_PER_UNIT: f64 = 8.0;
const PINCER_OFFSET_X: f64 = 160.0;
const PINCER_SPACING_Y: f64 = 45.0;
const WALL_DISTANCE: f64 = 140.0;
const WALL_SPACING: f64 = 40.0;
const WALL_STAGGER: f64 = 20.0;
const WEDGE_APEX_DISTANCE: f64 = 80.0;
const WEDGE_RANK_SPACING: f64 = 35.0;
const AMBUSH_SCATTER: f64 = 250.0;
const PROTECT_RANGED_RADIUS: f64 = 180.0;
const PROTECT_GUARD_RADIUS: f64 = 100.0;
const PROTECT_GUARD_SPREAD: f64 = 0.35;
const PROTECT_FLANK_RADIUS: f64 = 90.0;
const TRIANGLE_RADIUS: f64 = 120.0;
const ENCIRCLE_INNER_RADIUS: f64 = 80.0;
const ENCIRCLE_OUTER_RADIUS: f64 = 140.0;
const ENCIRCLE_INNER_MAX: usize = 6;

fn at_angle(center: Vec2, angle: f64, distance: f64) -> Vec2 {
    center + Vec2::from_angle(angle) * distance
}

/// Compute one slot per enemy in `mix` for `style` around `player`.
///
/// `approach` is the unit direction from the player toward the group;
/// line layouts (wall, wedge) are built on that side. A zero vector
/// falls back to +x.
pub fn compute_positions<R: Rng>(
    style: FormationStyle,
    mix: UnitMix,
    player: Vec2,
    approach: Vec2,
    rng: &mut R,
) -> Vec<FormationSlot> {
    let count = mix.total();
    if count == 0 {
        return Vec::new();
    }
    let approach = approach.try_normalize().unwrap_or(Vec2::X);

    match style {
        FormationStyle::Surround => surround(count, player),
        FormationStyle::Pincer => pincer(count, player),
        FormationStyle::Wall => wall(count, player, approach),
        FormationStyle::Wedge => wedge(count, player, approach),
        FormationStyle::Ambush => ambush(count, player, rng),
        FormationStyle::ProtectRanged => protect_ranged(mix, player),
        FormationStyle::TriangleAssault => triangle_assault(count, player),
        FormationStyle::EncircleTrap => encircle_trap(count, player),
    }
}

fn surround(count: usize, player: Vec2) -> Vec<FormationSlot> {
    let radius = SURROUND_BASE_RADIUS + SURROUND_RADIUS_PER_UNIT * count as f64;
    (0..count)
        .map(|i| FormationSlot::plain(at_angle(player, TAU * i as f64 / count as f64, radius)))
        .collect()
}

fn pincer(count: usize, player: Vec2) -> Vec<FormationSlot> {
    let half = count / 2;
    let quarter = (count / 4) as f64;
    (0..count)
        .map(|i| {
            let x = if i < half { -PINCER_OFFSET_X } else { PINCER_OFFSET_X };
            let y = (i as f64 - quarter) * PINCER_SPACING_Y;
            FormationSlot::plain(player + Vec2::new(x, y))
        })
        .collect()
}

fn wall(count: usize, player: Vec2, approach: Vec2) -> Vec<FormationSlot> {
    let center = player + approach * WALL_DISTANCE;
    let across = approach.perp();
    let mid = (count as f64 - 1.0) / 2.0;
    (0..count)
        .map(|i| {
            let lateral = (i as f64 - mid) * WALL_SPACING;
            // Odd slots sit one half-rank behind the line
            let depth = if i % 2 == 1 { WALL_STAGGER } else { 0.0 };
            FormationSlot::plain(center + across * lateral + approach * depth)
        })
        .collect()
}

fn wedge(count: usize, player: Vec2, approach: Vec2) -> Vec<FormationSlot> {
    let apex = player + approach * WEDGE_APEX_DISTANCE;
    let across = approach.perp();
    let mut slots = vec![FormationSlot::new(apex, FormationRole::Assault, 3)];
    for i in 1..count {
        let rank = ((i + 1) / 2) as f64;
        let side = if i % 2 == 1 { -1.0 } else { 1.0 };
        let position = apex
            + approach * (rank * WEDGE_RANK_SPACING)
            + across * (side * rank * WEDGE_RANK_SPACING);
        slots.push(FormationSlot::new(position, FormationRole::Flanker, 2));
    }
    slots
}

fn ambush<R: Rng>(count: usize, player: Vec2, rng: &mut R) -> Vec<FormationSlot> {
    (0..count)
        .map(|_| {
            let offset = Vec2::new(
                rng.gen_range(-AMBUSH_SCATTER..=AMBUSH_SCATTER),
                rng.gen_range(-AMBUSH_SCATTER..=AMBUSH_SCATTER),
            );
            FormationSlot::plain(player + offset)
        })
        .collect()
}

fn protect_ranged(mix: UnitMix, player: Vec2) -> Vec<FormationSlot> {
    let mut slots = Vec::with_capacity(mix.total());
    let ranged = mix.ranged;

    let ranged_angles: Vec<f64> = (0..ranged)
        .map(|i| TAU * i as f64 / ranged.max(1) as f64 + PI)
        .collect();
    for &angle in &ranged_angles {
        slots.push(FormationSlot::new(
            at_angle(player, angle, PROTECT_RANGED_RADIUS),
            FormationRole::Ranged,
            3,
        ));
    }

    let guards = mix.melee.min(ranged * 2);
    for j in 0..guards {
        // Two guards per ranged ally, either side of its bearing
        let bearing = ranged_angles[j % ranged];
        let side = if (j / ranged) % 2 == 0 { -1.0 } else { 1.0 };
        slots.push(FormationSlot::new(
            at_angle(player, bearing + side * PROTECT_GUARD_SPREAD, PROTECT_GUARD_RADIUS),
            FormationRole::Protector,
            2,
        ));
    }

    let flankers = mix.melee - guards;
    for k in 0..flankers {
        slots.push(FormationSlot::new(
            at_angle(player, TAU * k as f64 / flankers as f64, PROTECT_FLANK_RADIUS),
            FormationRole::Flanker,
            1,
        ));
    }
    slots
}

fn triangle_assault(count: usize, player: Vec2) -> Vec<FormationSlot> {
    let apexes = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
    let mut slots: Vec<FormationSlot> = apexes
        .iter()
        .take(count)
        .map(|&a| FormationSlot::new(at_angle(player, a, TRIANGLE_RADIUS), FormationRole::Assault, 3))
        .collect();

    let remaining = count.saturating_sub(3);
    for i in 0..remaining {
        let side = i % 3;
        let t = (i / 3 + 1) as f64 / (remaining / 3 + 1).max(1) as f64;
        let from = Vec2::from_angle(apexes[side]);
        let to = Vec2::from_angle(apexes[(side + 1) % 3]);
        let position = player + (from * (1.0 - t) + to * t) * TRIANGLE_RADIUS;
        slots.push(FormationSlot::new(position, FormationRole::Assault, 2));
    }
    slots
}

fn encircle_trap(count: usize, player: Vec2) -> Vec<FormationSlot> {
    let inner = (count / 2).min(ENCIRCLE_INNER_MAX);
    let outer = count - inner;
    let mut slots = Vec::with_capacity(count);
    for i in 0..inner {
        slots.push(FormationSlot::new(
            at_angle(player, TAU * i as f64 / inner as f64, ENCIRCLE_INNER_RADIUS),
            FormationRole::Assault,
            3,
        ));
    }
    for i in 0..outer {
        let angle = TAU * i as f64 / outer as f64 + PI / outer as f64;
        slots.push(FormationSlot::new(
            at_angle(player, angle, ENCIRCLE_OUTER_RADIUS),
            FormationRole::Flanker,
            2,
        ));
    }
    slots
}
