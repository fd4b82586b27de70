//! Projectile system: flight, player hits and expiry.

use std::collections::BTreeSet;

use hecs::{Entity, World};

use horde_core::components::{Enemy, Player, Projectile};
use horde_core::events::AudioEvent;
use horde_core::types::{EnemyId, WorldBounds};
use horde_tactics::combat::{self, ProjectileOutcome};
use horde_tactics::player;

use crate::score::ScoreState;

/// Move every projectile and resolve hits on the player.
///
/// Projectiles of enemies that died or were removed go with them.
pub fn run(
    world: &mut World,
    player: &mut Player,
    dt: f64,
    bounds: &WorldBounds,
    audio_events: &mut Vec<AudioEvent>,
    score: &mut ScoreState,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let shooters: BTreeSet<EnemyId> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| !enemy.is_dying)
        .map(|(_, enemy)| enemy.id)
        .collect();

    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        if !shooters.contains(&projectile.owner) {
            despawn_buffer.push(entity);
            continue;
        }
        match combat::update_projectile(projectile, dt, player.position, player.radius, bounds) {
            ProjectileOutcome::Flying => {}
            ProjectileOutcome::Hit => {
                let source = Some((projectile.position, projectile.size));
                let taken = player::take_damage(player, projectile.damage, source);
                if taken > 0 {
                    audio_events.push(AudioEvent::PlayerDamage { amount: taken });
                    score.damage_taken += taken as u32;
                }
                despawn_buffer.push(entity);
            }
            ProjectileOutcome::Expired => despawn_buffer.push(entity),
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
