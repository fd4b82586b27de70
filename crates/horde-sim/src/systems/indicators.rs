//! Attack indicator system: advances telegraphs and fires projectiles.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use horde_core::components::{AttackIndicator, Enemy};
use horde_core::types::{EnemyId, Vec2, WorldBounds};
use horde_tactics::combat;

use crate::world_setup;

/// Advance every indicator. Indicators whose owner is gone or dying are
/// dropped without firing.
pub fn run(
    world: &mut World,
    player: Vec2,
    dt: f64,
    bounds: &WorldBounds,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let owners: BTreeMap<EnemyId, Enemy> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| !enemy.is_dying)
        .map(|(_, enemy)| (enemy.id, enemy.clone()))
        .collect();

    let mut fired = Vec::new();
    for (entity, indicator) in world.query_mut::<&mut AttackIndicator>() {
        let Some(owner) = owners.get(&indicator.owner) else {
            despawn_buffer.push(entity);
            continue;
        };
        if let Some(projectile) = combat::update_indicator(indicator, dt, owner, player, bounds) {
            fired.push(projectile);
        }
        if indicator.fired {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    for projectile in fired {
        world_setup::spawn_projectile(world, projectile);
    }
}
