//! Cleanup system: removes enemies whose death fade has finished.

use hecs::{Entity, World};

use horde_core::components::Enemy;
use horde_tactics::combat;

/// Despawn faded-out enemies. Uses a pre-allocated buffer to avoid
/// per-tick allocation. Returns how many were removed.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, enemy) in world.query_mut::<&Enemy>() {
        if combat::should_be_removed(enemy) {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
