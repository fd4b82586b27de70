//! Formation system: runs the coordinator and applies its events.

use std::collections::BTreeSet;

use hecs::World;
use tracing::debug;

use horde_core::components::Enemy;
use horde_core::events::FormationEvent;
use horde_core::types::{EnemyId, Vec2};
use horde_tactics::coordinator::FormationCoordinator;

/// Advance the coordinator one tick. Returns the events it raised.
pub fn run(
    world: &mut World,
    coordinator: &mut FormationCoordinator,
    dt: f64,
    player: Vec2,
) -> Vec<FormationEvent> {
    let roster = super::roster(world);
    let events = coordinator.update(dt, &roster, player);

    for event in &events {
        debug!(?event, "formation event");
        if let FormationEvent::CoordinatedStrike {
            members,
            cooldown_cut,
        } = event
        {
            cut_cooldowns(world, members, *cooldown_cut);
        }
    }
    events
}

/// Bring every striking member's next attack forward.
fn cut_cooldowns(world: &mut World, members: &[EnemyId], cut: f64) {
    let members: BTreeSet<EnemyId> = members.iter().copied().collect();
    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        if members.contains(&enemy.id) {
            enemy.attack_cooldown = (enemy.attack_cooldown - cut).max(0.0);
        }
    }
}
