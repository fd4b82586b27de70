//! Enemy AI system: runs the tactical dispatcher for every enemy and
//! applies its decisions.
//!
//! Decisions are computed from a read-only pass over the world and applied
//! in a second pass, so movement in one enemy never feeds another's
//! decision within the same tick.

use hecs::{Entity, World};

use horde_core::components::{Enemy, Player};
use horde_core::events::AudioEvent;
use horde_core::types::WorldBounds;
use horde_tactics::combat;
use horde_tactics::coordinator::FormationCoordinator;
use horde_tactics::dispatcher::{decide, AttackOrder, TacticalContext, TacticalDecision};
use horde_tactics::player;

use crate::score::ScoreState;
use crate::world_setup;

/// Run the dispatcher for every enemy.
pub fn run(
    world: &mut World,
    coordinator: &FormationCoordinator,
    player: &mut Player,
    dt: f64,
    bounds: &WorldBounds,
    audio_events: &mut Vec<AudioEvent>,
    score: &mut ScoreState,
) {
    let allies = super::roster(world);
    let memberships = coordinator.memberships();

    let decisions: Vec<(Entity, TacticalDecision)> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, enemy)| {
            let ctx = TacticalContext {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                speed: enemy.speed,
                attack_range: enemy.attack_range,
                attack_cooldown: enemy.attack_cooldown,
                attack_power: enemy.attack_power,
                preferred_distance: enemy.preferred_distance,
                knockback: enemy.knockback,
                is_dying: enemy.is_dying,
                membership: memberships.get(&enemy.id),
                memberships,
                player: player.position,
                allies: &allies,
                world: *bounds,
                dt,
            };
            (entity, decide(&ctx))
        })
        .collect();

    let mut volleys = Vec::new();
    for (entity, decision) in decisions {
        let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
            continue;
        };
        if enemy.is_dying {
            continue;
        }
        enemy.position += decision.displacement;
        enemy.state = decision.state;

        match decision.attack {
            Some(AttackOrder::Melee { damage, cooldown }) => {
                enemy.attack_cooldown = cooldown;
                let taken =
                    player::take_damage(player, damage, Some((enemy.position, enemy.radius)));
                if taken > 0 {
                    audio_events.push(AudioEvent::PlayerDamage { amount: taken });
                    score.damage_taken += taken as u32;
                }
            }
            Some(AttackOrder::Ranged { cooldown }) => {
                enemy.attack_cooldown = cooldown;
                volleys.extend(combat::plan_volley(&enemy, player.position, bounds));
            }
            None => {}
        }
    }

    for indicator in volleys {
        world_setup::spawn_indicator(world, indicator);
    }
}
