//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the formation coordinator
//! and the wave manager, processes player commands, runs all systems, and
//! produces `ArenaSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use horde_core::commands::PlayerCommand;
use horde_core::components::Player;
use horde_core::constants::DT;
use horde_core::enums::{CharacterClass, GamePhase};
use horde_core::events::AudioEvent;
use horde_core::state::ArenaSnapshot;
use horde_core::types::{SimTime, Vec2, WorldBounds};
use horde_tactics::coordinator::{FormationConfig, FormationCoordinator};
use horde_tactics::player;
use horde_tactics::waves::{WaveConfig, WaveManager};

use crate::score::ScoreState;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub world: WorldBounds,
    pub formation: FormationConfig,
    pub waves: WaveConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            world: WorldBounds::default(),
            formation: FormationConfig::default(),
            waves: WaveConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: EngineConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    coordinator: FormationCoordinator,
    waves: WaveManager,
    next_enemy_id: u32,
    attack_requested: bool,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let coordinator = FormationCoordinator::new(
            config.formation.clone(),
            ChaCha8Rng::seed_from_u64(rng.gen()),
        );
        let waves = WaveManager::new(
            config.waves.clone(),
            config.world,
            ChaCha8Rng::seed_from_u64(rng.gen()),
        );
        Self {
            time_scale: config.time_scale,
            config,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            coordinator,
            waves,
            next_enemy_id: 0,
            attack_requested: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            score: ScoreState::default(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = DT * self.time_scale;
            if dt > 0.0 {
                self.run_systems(dt);
            }
            self.time.advance(dt);
            self.score.run_time_secs = self.time.elapsed_secs;
        }
        self.attack_requested = false;

        let audio_events = std::mem::take(&mut self.audio_events);
        let ctx = SnapshotContext {
            time: &self.time,
            phase: self.phase,
            bounds: self.config.world,
            coordinator: &self.coordinator,
            waves: &self.waves,
            score: &self.score,
        };
        systems::snapshot::build_snapshot(&self.world, &ctx, audio_events)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn coordinator(&self) -> &FormationCoordinator {
        &self.coordinator
    }

    pub fn waves(&self) -> &WaveManager {
        &self.waves
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun { class } => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.start_run(class);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = if scale.is_finite() {
                    scale.clamp(0.0, 4.0)
                } else {
                    1.0
                };
            }
            PlayerCommand::Move { x, y } => {
                for (_entity, p) in self.world.query_mut::<&mut Player>() {
                    player::set_move_intent(p, Vec2::new(x, y));
                }
            }
            PlayerCommand::Attack => {
                self.attack_requested = true;
            }
            PlayerCommand::Dash => {
                if self.phase == GamePhase::Active {
                    for (_entity, p) in self.world.query_mut::<&mut Player>() {
                        player::try_dash(p);
                    }
                }
            }
        }
    }

    /// Reset the arena and begin at the configured first wave.
    fn start_run(&mut self, class: CharacterClass) {
        world_setup::setup_run(&mut self.world, class, &self.config.world);
        self.coordinator = FormationCoordinator::new(
            self.config.formation.clone(),
            ChaCha8Rng::seed_from_u64(self.rng.gen()),
        );
        self.waves = WaveManager::new(
            self.config.waves.clone(),
            self.config.world,
            ChaCha8Rng::seed_from_u64(self.rng.gen()),
        );
        self.waves.start_wave(self.config.waves.first_wave.max(1));
        self.next_enemy_id = 0;
        self.score = ScoreState::default();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
        info!(?class, seed = self.config.seed, "run started");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let Some((player_entity, mut player)) = world_setup::load_player(&self.world) else {
            return;
        };
        let bounds = self.config.world;

        // 1. Player movement, dash and melee swing
        systems::player::run(
            &mut self.world,
            &mut player,
            self.attack_requested,
            dt,
            &bounds,
            &mut self.rng,
            &mut self.audio_events,
            &mut self.score,
        );
        // 2. Wave spawning and completion
        if systems::wave_spawner::run(
            &mut self.world,
            &mut self.waves,
            &mut self.next_enemy_id,
            dt,
        ) {
            let cleared = self.waves.wave();
            self.audio_events.push(AudioEvent::WaveComplete { wave: cleared });
            self.score.waves_cleared += 1;
            self.waves.start_wave(cleared + 1);
        }
        // 3. Formation coordinator
        systems::formation::run(&mut self.world, &mut self.coordinator, dt, player.position);
        // 4. Tactical AI
        systems::enemy_ai::run(
            &mut self.world,
            &self.coordinator,
            &mut player,
            dt,
            &bounds,
            &mut self.audio_events,
            &mut self.score,
        );
        // 5. Attack indicators
        systems::indicators::run(
            &mut self.world,
            player.position,
            dt,
            &bounds,
            &mut self.despawn_buffer,
        );
        // 6. Projectiles
        systems::projectiles::run(
            &mut self.world,
            &mut player,
            dt,
            &bounds,
            &mut self.audio_events,
            &mut self.score,
            &mut self.despawn_buffer,
        );
        // 7. Enemy fades and knockback
        systems::movement::run(&mut self.world, dt, &bounds);
        // 8. Cleanup (faded-out enemies)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        let alive = player::is_alive(&player);
        world_setup::store_player(&mut self.world, player_entity, player);
        if !alive {
            info!(
                wave = self.waves.wave(),
                kills = self.score.enemies_killed,
                "player down"
            );
            self.phase = GamePhase::GameOver;
        }
    }
}
