//! Player system: movement, dash, timers and the melee swing.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use horde_core::components::{Enemy, Player};
use horde_core::constants::PLAYER_DAMAGE_JITTER;
use horde_core::events::AudioEvent;
use horde_core::types::WorldBounds;
use horde_tactics::combat;
use horde_tactics::player;

use crate::score::ScoreState;

/// Advance the player and resolve a queued attack.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: &mut Player,
    attack_requested: bool,
    dt: f64,
    bounds: &WorldBounds,
    rng: &mut ChaCha8Rng,
    audio_events: &mut Vec<AudioEvent>,
    score: &mut ScoreState,
) {
    player::update_player(player, dt, bounds);
    if attack_requested && player::can_attack(player) {
        swing(world, player, rng, audio_events, score);
    }
}

/// Hit every non-dying enemy within attack range.
fn swing(
    world: &mut World,
    player: &mut Player,
    rng: &mut ChaCha8Rng,
    audio_events: &mut Vec<AudioEvent>,
    score: &mut ScoreState,
) {
    player.attack_cooldown = player.attack_interval;
    audio_events.push(AudioEvent::Attack {
        position: player.position,
    });

    let mut experience = 0;
    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        if enemy.is_dying || enemy.position.distance(player.position) > player.attack_range {
            continue;
        }
        let damage = player.attack_power + rng.gen_range(-PLAYER_DAMAGE_JITTER..=PLAYER_DAMAGE_JITTER);
        if combat::take_damage(enemy, damage) {
            audio_events.push(AudioEvent::EnemyDeath {
                enemy: enemy.id,
                kind: enemy.kind,
            });
            score.enemies_killed += 1;
            experience += enemy.exp_value;
        } else {
            audio_events.push(AudioEvent::EnemyHit {
                enemy: enemy.id,
                kind: enemy.kind,
            });
            let impulse =
                combat::enemy_knockback_impulse(enemy.position, player.position, damage);
            combat::apply_enemy_knockback(enemy, impulse);
        }
    }

    if experience > 0 {
        let before = player.level;
        let gained = player::add_experience(player, experience);
        for level in before + 1..=before + gained {
            audio_events.push(AudioEvent::LevelUp { level });
        }
    }
}
