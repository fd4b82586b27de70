//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only work). Long-lived AI state lives in the coordinator and wave
//! manager owned by the engine; everything else lives in components.

pub mod cleanup;
pub mod enemy_ai;
pub mod formation;
pub mod indicators;
pub mod movement;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;

use hecs::World;

use horde_core::components::Enemy;
use horde_tactics::formation::UnitSnapshot;

/// Living, non-dying enemies ordered by id.
///
/// Taken before any enemy moves so every AI decision in a tick reads the
/// same ally positions.
pub fn roster(world: &World) -> Vec<UnitSnapshot> {
    let mut units: Vec<UnitSnapshot> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| !enemy.is_dying)
        .map(|(_, enemy)| UnitSnapshot {
            id: enemy.id,
            kind: enemy.kind,
            position: enemy.position,
        })
        .collect();
    units.sort_by_key(|u| u.id);
    units
}
