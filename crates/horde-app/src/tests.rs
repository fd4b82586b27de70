use std::fs;
use std::path::PathBuf;

use clap::Parser;

use horde_campaign::SaveStore;
use horde_core::commands::PlayerCommand;
use horde_core::enums::{AiState, CharacterClass, EnemyKind, GamePhase};
use horde_core::state::{ArenaSnapshot, EnemyView, ProjectileView};
use horde_core::types::{EnemyId, Vec2};
use horde_sim::EngineConfig;

use crate::cli::{ClassArg, Cli};
use crate::config::{load_config, validate};
use crate::error::ConfigError;
use crate::game_loop::{record_run, run, RunOptions, TICK_DURATION};
use crate::pilot::Pilot;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("horde_app_test_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn options(max_ticks: u64) -> RunOptions {
    RunOptions {
        class: CharacterClass::Warrior,
        max_ticks,
        snapshot_every: 60,
        realtime: false,
    }
}

fn active_snapshot() -> ArenaSnapshot {
    let mut snapshot = ArenaSnapshot {
        phase: GamePhase::Active,
        ..Default::default()
    };
    snapshot.player.class = CharacterClass::Survivor;
    snapshot.player.position = Vec2::new(800.0, 600.0);
    snapshot.player.hp = 100;
    snapshot.player.max_hp = 100;
    snapshot.player.dash_ready = 1.0;
    snapshot
}

fn enemy_at(id: u32, position: Vec2) -> EnemyView {
    EnemyView {
        id: EnemyId(id),
        kind: EnemyKind::Crawler,
        position,
        radius: 12.0,
        hp: 30,
        max_hp: 30,
        alpha: 1.0,
        damage_flash: 0.0,
        state: AiState::Chasing,
        formation_role: None,
    }
}

fn moves(commands: &[PlayerCommand]) -> Vec<(f64, f64)> {
    commands
        .iter()
        .filter_map(|c| match c {
            PlayerCommand::Move { x, y } => Some((*x, *y)),
            _ => None,
        })
        .collect()
}

// ---- CLI ----

#[test]
fn cli_defaults() {
    let cli = Cli::try_parse_from(["horde"]).unwrap();
    assert_eq!(cli.ticks, 36_000);
    assert_eq!(cli.snapshot_every, 60);
    assert_eq!(cli.class, ClassArg::Survivor);
    assert!(cli.config.is_none());
    assert!(!cli.realtime);
}

#[test]
fn cli_parses_class_and_seed() {
    let cli = Cli::try_parse_from(["horde", "--class", "fire-shooter", "--seed", "7", "-t", "100"])
        .unwrap();
    assert_eq!(CharacterClass::from(cli.class), CharacterClass::FireShooter);
    assert_eq!(cli.seed, Some(7));
    assert_eq!(cli.ticks, 100);
    assert!(Cli::try_parse_from(["horde", "--class", "paladin"]).is_err());
}

// ---- Config ----

#[test]
fn default_config_is_valid() {
    assert!(validate(&EngineConfig::default()).is_ok());
    let config = load_config(None).unwrap();
    assert_eq!(config.seed, EngineConfig::default().seed);
}

#[test]
fn partial_config_fills_defaults() {
    let dir = fresh_dir("partial");
    let path = dir.join("engine.json");
    fs::write(&path, r#"{ "seed": 7, "waves": { "first_wave": 3 } }"#).unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.waves.first_wave, 3);
    assert_eq!(
        config.formation.min_form_size,
        EngineConfig::default().formation.min_form_size
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn config_errors_are_typed() {
    let dir = fresh_dir("bad_config");
    let missing = dir.join("missing.json");
    assert!(matches!(
        load_config(Some(&missing)),
        Err(ConfigError::Io { .. })
    ));

    let broken = dir.join("broken.json");
    fs::write(&broken, "{ seed: ").unwrap();
    assert!(matches!(
        load_config(Some(&broken)),
        Err(ConfigError::Parse { .. })
    ));

    let invalid = dir.join("invalid.json");
    fs::write(&invalid, r#"{ "formation": { "min_form_size": 2 } }"#).unwrap();
    assert!(matches!(
        load_config(Some(&invalid)),
        Err(ConfigError::Invalid(_))
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn validate_rejects_bad_values() {
    let mut config = EngineConfig::default();
    config.world.width = 0.0;
    assert!(validate(&config).is_err());

    let mut config = EngineConfig::default();
    config.time_scale = f64::NAN;
    assert!(validate(&config).is_err());

    let mut config = EngineConfig::default();
    config.waves.first_wave = 0;
    assert!(validate(&config).is_err());

    let mut config = EngineConfig::default();
    config.waves.base_spawn_delay = 0.0;
    assert!(validate(&config).is_err());
}

// ---- Pilot ----

#[test]
fn pilot_is_idle_outside_a_run() {
    let mut pilot = Pilot::new();
    let mut snapshot = active_snapshot();
    snapshot.phase = GamePhase::MainMenu;
    assert!(pilot.decide(&snapshot).is_empty());
    snapshot.phase = GamePhase::GameOver;
    assert!(pilot.decide(&snapshot).is_empty());
}

#[test]
fn pilot_closes_on_distant_enemy() {
    let mut pilot = Pilot::new();
    let mut snapshot = active_snapshot();
    snapshot.enemies.push(enemy_at(0, Vec2::new(1100.0, 600.0)));

    let commands = pilot.decide(&snapshot);
    assert!(!commands.iter().any(|c| matches!(c, PlayerCommand::Attack)));
    let moves = moves(&commands);
    assert_eq!(moves.len(), 1);
    assert!((moves[0].0 - 1.0).abs() < 1e-9);
    assert!(moves[0].1.abs() < 1e-9);
}

#[test]
fn pilot_swings_and_holds_in_range() {
    let mut pilot = Pilot::new();
    let mut snapshot = active_snapshot();
    // Survivor reach is 60
    snapshot.enemies.push(enemy_at(0, Vec2::new(840.0, 600.0)));

    let commands = pilot.decide(&snapshot);
    assert!(commands.iter().any(|c| matches!(c, PlayerCommand::Attack)));
    assert_eq!(moves(&commands), vec![(0.0, 0.0)]);
}

#[test]
fn pilot_ignores_dying_enemies() {
    let mut pilot = Pilot::new();
    let mut snapshot = active_snapshot();
    let mut corpse = enemy_at(0, Vec2::new(820.0, 600.0));
    corpse.state = AiState::Dying;
    snapshot.enemies.push(corpse);
    snapshot.enemies.push(enemy_at(1, Vec2::new(800.0, 300.0)));

    let commands = pilot.decide(&snapshot);
    assert!(!commands.iter().any(|c| matches!(c, PlayerCommand::Attack)));
    let moves = moves(&commands);
    assert!(moves[0].1 < -0.99);
}

#[test]
fn pilot_retreats_when_hurt() {
    let mut pilot = Pilot::new();
    let mut snapshot = active_snapshot();
    snapshot.player.hp = 20;
    snapshot.enemies.push(enemy_at(0, Vec2::new(900.0, 600.0)));

    let moves = moves(&pilot.decide(&snapshot));
    assert!(moves[0].0 < 0.0);
}

#[test]
fn pilot_dashes_from_close_projectile() {
    let mut pilot = Pilot::new();
    let mut snapshot = active_snapshot();
    snapshot.projectiles.push(ProjectileView {
        kind: EnemyKind::Sniper,
        position: Vec2::new(830.0, 600.0),
        size: 6.0,
    });
    assert!(pilot
        .decide(&snapshot)
        .iter()
        .any(|c| matches!(c, PlayerCommand::Dash)));

    snapshot.player.dash_ready = 0.5;
    assert!(!pilot
        .decide(&snapshot)
        .iter()
        .any(|c| matches!(c, PlayerCommand::Dash)));
}

#[test]
fn pilot_does_not_repeat_unchanged_move() {
    let mut pilot = Pilot::new();
    let mut snapshot = active_snapshot();
    snapshot.enemies.push(enemy_at(0, Vec2::new(1100.0, 600.0)));
    assert_eq!(moves(&pilot.decide(&snapshot)).len(), 1);
    assert!(moves(&pilot.decide(&snapshot)).is_empty());
}

// ---- Game loop ----

#[test]
fn tick_duration_matches_tick_rate() {
    assert_eq!(TICK_DURATION.as_nanos(), 1_000_000_000u128 / 60);
}

#[test]
fn zero_tick_budget_never_starts() {
    let summary = run(EngineConfig::default(), &options(0), None).unwrap();
    assert_eq!(summary.ticks, 0);
    assert_eq!(summary.final_phase, GamePhase::MainMenu);
}

#[test]
fn headless_runs_are_deterministic() {
    let config = EngineConfig {
        seed: 9,
        ..Default::default()
    };
    let a = run(config.clone(), &options(900), None).unwrap();
    let b = run(config, &options(900), None).unwrap();
    assert_eq!(
        serde_json::to_value(&a).unwrap(),
        serde_json::to_value(&b).unwrap()
    );
    assert!(a.ticks > 0);
    assert!(a.wave >= 1);
}

#[test]
fn snapshots_are_written_as_json_lines() {
    let mut out: Vec<u8> = Vec::new();
    let summary = run(EngineConfig::default(), &options(120), Some(&mut out)).unwrap();
    assert_eq!(summary.ticks, 120);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let last: ArenaSnapshot = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(last.time.tick, 120);
    assert_eq!(last.phase, GamePhase::Active);
}

#[test]
fn finished_run_is_saved() {
    let dir = fresh_dir("record");
    let store = SaveStore::new(&dir);
    let summary = run(EngineConfig::default(), &options(60), None).unwrap();

    let id = record_run(&store, "nightly", &summary).unwrap();
    let stats = store.fetch_character_stats(id).unwrap();
    assert_eq!(stats[0].character_class, CharacterClass::Warrior);
    assert_eq!(stats[0].character_wave, summary.wave.max(1));

    assert!(record_run(&store, "", &summary).is_none());
    assert_eq!(store.fetch_all_save_state().unwrap().len(), 1);

    let _ = fs::remove_dir_all(&dir);
}
