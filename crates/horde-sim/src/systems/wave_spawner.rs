//! Wave spawning system: feeds the wave manager and places its spawns.

use hecs::World;

use horde_core::components::Enemy;
use horde_tactics::waves::WaveManager;

use crate::world_setup;

/// Advance wave pacing and spawn any due enemies.
///
/// Returns true on the tick the current wave completes.
pub fn run(world: &mut World, waves: &mut WaveManager, next_id: &mut u32, dt: f64) -> bool {
    let living = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| !enemy.is_dying)
        .count();

    let mut spawned = Vec::new();
    let completed = waves.update(dt, living, &mut spawned);
    for order in &spawned {
        world_setup::spawn_enemy(world, next_id, order);
    }
    completed
}
