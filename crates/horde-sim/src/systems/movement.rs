//! Enemy physics: fade timers, cooldowns and knockback drift.

use hecs::World;

use horde_core::components::Enemy;
use horde_core::types::WorldBounds;
use horde_tactics::combat;

pub fn run(world: &mut World, dt: f64, bounds: &WorldBounds) {
    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        combat::update_enemy(enemy, dt, bounds);
    }
}
