//! Scripted player for headless runs.
//!
//! Reads the last snapshot and answers with the commands a cautious human
//! would send: close in and swing at the nearest enemy, back off toward the
//! arena center when hurt, and dash away from incoming projectiles.

use horde_core::commands::PlayerCommand;
use horde_core::enums::{AiState, GamePhase};
use horde_core::state::{ArenaSnapshot, EnemyView};
use horde_core::types::Vec2;
use horde_tactics::profiles::get_class_profile;

/// Projectiles closer than this trigger a dash.
const DODGE_RADIUS: f64 = 70.0;
/// HP fraction below which the pilot retreats.
const RETREAT_HP_FRACTION: f64 = 0.3;
/// Fraction of attack range the pilot closes to before stopping.
const ENGAGE_FRACTION: f64 = 0.8;

#[derive(Debug, Clone, Default)]
pub struct Pilot {
    last_move: Option<Vec2>,
}

impl Pilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for the next tick. Empty outside an active run.
    pub fn decide(&mut self, snapshot: &ArenaSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != GamePhase::Active {
            return Vec::new();
        }
        let player = &snapshot.player;
        let attack_range = get_class_profile(player.class).attack_range;
        let mut commands = Vec::new();

        let target = nearest_enemy(snapshot);
        let center = snapshot.world.center();

        let intent = match target {
            None => (center - player.position).normalize_or_zero(),
            Some(enemy) => {
                let offset = enemy.position - player.position;
                let distance = offset.length();
                let hurt = player.max_hp > 0
                    && (player.hp as f64) < player.max_hp as f64 * RETREAT_HP_FRACTION;
                if distance <= attack_range {
                    commands.push(PlayerCommand::Attack);
                }
                if hurt {
                    let away = -offset.normalize_or_zero();
                    let home = (center - player.position).normalize_or_zero();
                    (away + home * 0.5).normalize_or_zero()
                } else if distance > attack_range * ENGAGE_FRACTION {
                    offset.normalize_or_zero()
                } else {
                    Vec2::ZERO
                }
            }
        };

        if player.dash_ready >= 1.0 && !player.dashing && incoming_projectile(snapshot) {
            commands.push(PlayerCommand::Dash);
        }

        if self.last_move != Some(intent) {
            self.last_move = Some(intent);
            commands.push(PlayerCommand::Move {
                x: intent.x,
                y: intent.y,
            });
        }
        commands
    }
}

fn nearest_enemy(snapshot: &ArenaSnapshot) -> Option<&EnemyView> {
    let origin = snapshot.player.position;
    snapshot
        .enemies
        .iter()
        .filter(|e| e.state != AiState::Dying)
        .min_by(|a, b| {
            a.position
                .distance_squared(origin)
                .total_cmp(&b.position.distance_squared(origin))
        })
}

fn incoming_projectile(snapshot: &ArenaSnapshot) -> bool {
    let origin = snapshot.player.position;
    snapshot
        .projectiles
        .iter()
        .any(|p| p.position.distance(origin) <= DODGE_RADIUS + p.size)
}
