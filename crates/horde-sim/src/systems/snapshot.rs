//! Snapshot system: queries the ECS world and builds a complete ArenaSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use horde_core::components::*;
use horde_core::enums::*;
use horde_core::events::AudioEvent;
use horde_core::state::*;
use horde_core::types::{SimTime, WorldBounds};
use horde_tactics::combat;
use horde_tactics::coordinator::FormationCoordinator;
use horde_tactics::player;
use horde_tactics::waves::WaveManager;

use crate::score::ScoreState;

/// Everything outside the world that the snapshot reads.
pub struct SnapshotContext<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub bounds: WorldBounds,
    pub coordinator: &'a FormationCoordinator,
    pub waves: &'a WaveManager,
    pub score: &'a ScoreState,
}

/// Build a complete ArenaSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: &SnapshotContext,
    audio_events: Vec<AudioEvent>,
) -> ArenaSnapshot {
    let enemies = build_enemies(world, ctx.coordinator);
    let living = enemies.iter().filter(|e| e.state != AiState::Dying).count() as u32;

    ArenaSnapshot {
        time: *ctx.time,
        phase: ctx.phase,
        world: ctx.bounds,
        player: build_player(world),
        enemies,
        indicators: build_indicators(world),
        projectiles: build_projectiles(world),
        formation: build_formation(ctx.coordinator),
        wave: WaveView {
            number: ctx.waves.wave(),
            pending: ctx.waves.pending() as u32,
            living,
        },
        audio_events,
        score: ctx.score.view(),
    }
}

fn build_player(world: &World) -> PlayerView {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(_, p)| PlayerView {
            class: p.class,
            position: p.position,
            radius: p.radius,
            hp: p.hp,
            max_hp: p.max_hp,
            level: p.level,
            experience: p.experience,
            experience_to_next: player::experience_to_next(p),
            stat_points: p.stat_points,
            dashing: player::is_dashing(p),
            dash_ready: if p.dash_cooldown_max > 0.0 {
                (1.0 - p.dash_cooldown / p.dash_cooldown_max).clamp(0.0, 1.0)
            } else {
                1.0
            },
            damage_flash: p.damage_flash,
        })
        .unwrap_or_default()
}

fn build_enemies(world: &World, coordinator: &FormationCoordinator) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<&Enemy>()
        .iter()
        .map(|(_, e)| EnemyView {
            id: e.id,
            kind: e.kind,
            position: e.position,
            radius: e.radius,
            hp: e.hp,
            max_hp: e.max_hp,
            alpha: combat::enemy_alpha(e),
            damage_flash: e.damage_flash,
            state: e.state,
            formation_role: coordinator.membership(e.id).map(|m| m.role),
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_indicators(world: &World) -> Vec<IndicatorView> {
    let mut indicators: Vec<IndicatorView> = world
        .query::<&AttackIndicator>()
        .iter()
        .filter(|(_, i)| i.elapsed >= i.delay)
        .map(|(_, i)| IndicatorView {
            owner: i.owner,
            kind: i.kind,
            target: i.target,
            progress: combat::indicator_progress(i),
        })
        .collect();

    indicators.sort_by(|a, b| a.owner.cmp(&b.owner).then(a.progress.total_cmp(&b.progress)));
    indicators
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            kind: p.kind,
            position: p.position,
            size: p.size,
        })
        .collect();

    projectiles.sort_by(|a, b| {
        a.position
            .x
            .total_cmp(&b.position.x)
            .then(a.position.y.total_cmp(&b.position.y))
    });
    projectiles
}

fn build_formation(coordinator: &FormationCoordinator) -> Option<FormationView> {
    coordinator.active().map(|f| FormationView {
        style: f.style,
        members: f.members.len() as u32,
        coordinated: f.is_striking(),
        disband_in_secs: f.disband_timer.max(0.0),
    })
}
