//! Entity spawn factories and player access for the arena world.
//!
//! The player is a single entity carrying a `Player` component; enemies,
//! attack indicators and projectiles are one entity each.

use hecs::{Entity, World};

use horde_core::components::{AttackIndicator, Player, Projectile};
use horde_core::enums::CharacterClass;
use horde_core::types::{EnemyId, WorldBounds};
use horde_tactics::combat;
use horde_tactics::player::new_player;
use horde_tactics::waves::SpawnOrder;

/// Clear the world and place a fresh player at the arena center.
pub fn setup_run(world: &mut World, class: CharacterClass, bounds: &WorldBounds) -> Entity {
    world.clear();
    spawn_player(world, class, bounds)
}

pub fn spawn_player(world: &mut World, class: CharacterClass, bounds: &WorldBounds) -> Entity {
    world.spawn((new_player(class, bounds.center()),))
}

/// Spawn one enemy from a wave order, taking the next id.
pub fn spawn_enemy(world: &mut World, next_id: &mut u32, order: &SpawnOrder) -> Entity {
    let id = EnemyId(*next_id);
    *next_id += 1;
    let enemy = combat::spawn_enemy(
        id,
        order.kind,
        order.position,
        order.max_hp,
        order.attack_power,
    );
    world.spawn((enemy,))
}

pub fn spawn_indicator(world: &mut World, indicator: AttackIndicator) -> Entity {
    world.spawn((indicator,))
}

pub fn spawn_projectile(world: &mut World, projectile: Projectile) -> Entity {
    world.spawn((projectile,))
}

/// Copy of the player component and its entity, if a run is in progress.
pub fn load_player(world: &World) -> Option<(Entity, Player)> {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(entity, player)| (entity, player.clone()))
}

/// Write back a player previously taken with `load_player`.
pub fn store_player(world: &mut World, entity: Entity, player: Player) {
    if let Ok(mut slot) = world.get::<&mut Player>(entity) {
        *slot = player;
    }
}

