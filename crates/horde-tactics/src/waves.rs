//! Wave composition, spawn pacing and difficulty scaling.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use horde_core::constants::*;
use horde_core::enums::EnemyKind;
use horde_core::types::{Vec2, WorldBounds};

use crate::profiles::get_profile;

/// Tunables for wave pacing and scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Wave number the run starts at.
    pub first_wave: u32,
    /// Spawn delay with no pressure (seconds).
    pub base_spawn_delay: f64,
    /// HP growth per wave after the first.
    pub hp_scale: f64,
    /// Attack growth per wave after the first.
    pub attack_scale: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            first_wave: 1,
            base_spawn_delay: WAVE_BASE_SPAWN_DELAY,
            hp_scale: WAVE_HP_SCALE,
            attack_scale: WAVE_ATTACK_SCALE,
        }
    }
}

/// A single enemy ready to be placed in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub kind: EnemyKind,
    pub position: Vec2,
    /// Scaled for the current wave.
    pub max_hp: i32,
    /// Scaled for the current wave.
    pub attack_power: i32,
}

/// Unshuffled enemy list for wave `n`.
pub fn wave_composition(n: u32) -> Vec<EnemyKind> {
    let mut kinds = Vec::new();
    let mut add = |kind: EnemyKind, count: u32| {
        kinds.extend(std::iter::repeat(kind).take(count as usize));
    };

    add(EnemyKind::Crawler, 2 + n);
    if n >= 2 {
        add(EnemyKind::Brute, (n / 3).max(1));
    }
    if n >= 3 {
        add(EnemyKind::Sniper, (n / 4).max(1));
    }
    if n >= 4 {
        add(EnemyKind::FireShooter, (n / 3).max(1));
    }
    if n > 0 && n % BOSS_WAVE_INTERVAL == 0 {
        add(EnemyKind::Sniper, 2);
        add(EnemyKind::Brute, 2);
    }
    kinds
}

/// Drives one wave at a time: queue, pacing, placement and completion.
pub struct WaveManager {
    config: WaveConfig,
    world: WorldBounds,
    rng: ChaCha8Rng,
    wave: u32,
    queue: Vec<EnemyKind>,
    spawn_timer: f64,
    completed: bool,
}

impl WaveManager {
    pub fn new(config: WaveConfig, world: WorldBounds, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            world,
            rng,
            wave: 0,
            queue: Vec::new(),
            spawn_timer: 0.0,
            completed: false,
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Enemies still waiting to spawn this wave.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Shuffled spawn list for wave `n`.
    pub fn generate_wave_enemies(&mut self, n: u32) -> Vec<EnemyKind> {
        let mut kinds = wave_composition(n);
        kinds.shuffle(&mut self.rng);
        kinds
    }

    /// Reset the queue, timer and completion flag for wave `n`.
    pub fn start_wave(&mut self, n: u32) {
        self.wave = n;
        self.queue = self.generate_wave_enemies(n);
        self.spawn_timer = 0.0;
        self.completed = false;
        info!(wave = n, enemies = self.queue.len(), "wave started");
    }

    /// Mean spawn delay given the current number of living enemies.
    pub fn spawn_delay(&self, living: usize) -> f64 {
        let pressure = living as f64 / (self.wave as f64 * 2.0).max(1.0);
        self.config.base_spawn_delay * (1.0 + pressure * 0.5)
    }

    /// HP and attack for `kind` at the current wave.
    pub fn scaled_stats(&self, kind: EnemyKind) -> (i32, i32) {
        let profile = get_profile(kind);
        let step = self.wave.saturating_sub(1) as f64;
        let hp = (profile.max_hp as f64 * (1.0 + step * self.config.hp_scale)) as i32;
        let attack = (profile.attack_power as f64 * (1.0 + step * self.config.attack_scale)) as i32;
        (hp, attack)
    }

    /// Where an enemy of `kind` enters the arena.
    pub fn spawn_position(&mut self, kind: EnemyKind) -> Vec2 {
        let (w, h) = (self.world.width, self.world.height);
        if kind.is_ranged() {
            let points = [
                Vec2::new(-30.0, -30.0),
                Vec2::new(w + 30.0, -30.0),
                Vec2::new(-30.0, h + 30.0),
                Vec2::new(w + 30.0, h + 30.0),
                Vec2::new(w / 2.0, -40.0),
                Vec2::new(-40.0, h / 2.0),
                Vec2::new(w + 40.0, h / 2.0),
                Vec2::new(w / 2.0, h + 40.0),
            ];
            return points[self.rng.gen_range(0..points.len())];
        }

        let m = SPAWN_EDGE_MARGIN;
        match self.rng.gen_range(0..4) {
            0 => Vec2::new(self.rng.gen_range(0.0..=w), -m),
            1 => Vec2::new(w + m, self.rng.gen_range(0.0..=h)),
            2 => Vec2::new(self.rng.gen_range(0.0..=w), h + m),
            _ => Vec2::new(-m, self.rng.gen_range(0.0..=h)),
        }
    }

    /// Advance pacing by `dt`. Spawns due this tick are pushed to `spawned`.
    ///
    /// `living` counts enemies that are alive and not dying. Returns true
    /// exactly once per wave, when the queue is empty and nothing is alive.
    pub fn update(&mut self, dt: f64, living: usize, spawned: &mut Vec<SpawnOrder>) -> bool {
        let before = spawned.len();
        if !self.queue.is_empty() {
            self.spawn_timer -= dt;
            if self.spawn_timer <= 0.0 {
                let delay = self.spawn_delay(living);
                if let Some(kind) = self.queue.pop() {
                    let position = self.spawn_position(kind);
                    let (max_hp, attack_power) = self.scaled_stats(kind);
                    spawned.push(SpawnOrder {
                        kind,
                        position,
                        max_hp,
                        attack_power,
                    });
                }
                self.spawn_timer = self.rng.gen_range(delay * 0.8..=delay * 1.2);
            }
        }

        let alive = living + (spawned.len() - before);
        if self.wave > 0 && self.queue.is_empty() && alive == 0 && !self.completed {
            self.completed = true;
            info!(wave = self.wave, "wave complete");
            return true;
        }
        false
    }
}
