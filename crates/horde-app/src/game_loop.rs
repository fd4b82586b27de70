//! Headless game loop: ticks the engine, feeds the pilot, writes snapshots.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use horde_campaign::{NewSave, SaveStore};
use horde_core::commands::PlayerCommand;
use horde_core::constants::TICK_RATE;
use horde_core::enums::{CharacterClass, GamePhase};
use horde_core::state::{ArenaSnapshot, ScoreView};
use horde_sim::{EngineConfig, SimulationEngine};

use crate::cli::Cli;
use crate::config;
use crate::error::AppError;
use crate::pilot::Pilot;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How a run is driven.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub class: CharacterClass,
    pub max_ticks: u64,
    /// Write every Nth snapshot; 0 writes none.
    pub snapshot_every: u64,
    pub realtime: bool,
}

/// Outcome of a headless run, printed as JSON at exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub class: CharacterClass,
    pub ticks: u64,
    pub final_phase: GamePhase,
    pub wave: u32,
    pub level: u32,
    pub experience: u32,
    pub hp: i32,
    pub score: ScoreView,
    /// Id of the save slot recorded for this run, if one was written.
    pub save_id: Option<u32>,
}

/// Entry point used by the binary.
pub fn run_cli(cli: &Cli) -> Result<RunSummary, AppError> {
    let mut engine_config = config::load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        engine_config.seed = seed;
    }
    let options = RunOptions {
        class: cli.class.into(),
        max_ticks: cli.ticks,
        snapshot_every: cli.snapshot_every,
        realtime: cli.realtime,
    };

    let mut sink = match &cli.snapshots {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };
    let mut summary = run(
        engine_config,
        &options,
        sink.as_mut().map(|w| w as &mut dyn Write),
    )?;
    if let Some(mut writer) = sink {
        writer.flush()?;
    }

    if let Some(dir) = &cli.save_dir {
        summary.save_id = record_run(&SaveStore::new(dir), &cli.title, &summary);
    }
    Ok(summary)
}

/// Drive one run to game over or the tick budget.
pub fn run(
    config: EngineConfig,
    options: &RunOptions,
    mut sink: Option<&mut dyn Write>,
) -> Result<RunSummary, AppError> {
    let seed = config.seed;
    let mut engine = SimulationEngine::new(config);
    let mut pilot = Pilot::new();
    engine.queue_command(PlayerCommand::StartRun {
        class: options.class,
    });
    info!(seed, class = ?options.class, max_ticks = options.max_ticks, "headless run starting");

    let mut snapshot = ArenaSnapshot::default();
    let mut ticks = 0;
    let mut next_tick_time = Instant::now();

    while ticks < options.max_ticks {
        snapshot = engine.tick();
        ticks += 1;

        if let Some(writer) = sink.as_deref_mut() {
            if options.snapshot_every > 0 && ticks % options.snapshot_every == 0 {
                serde_json::to_writer(&mut *writer, &snapshot)?;
                writer.write_all(b"\n")?;
            }
        }

        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        engine.queue_commands(pilot.decide(&snapshot));

        if options.realtime {
            pace(&mut next_tick_time, engine.time_scale());
        }
    }

    info!(
        ticks,
        wave = snapshot.wave.number,
        kills = snapshot.score.enemies_killed,
        phase = ?snapshot.phase,
        "headless run finished"
    );
    Ok(RunSummary {
        seed,
        class: options.class,
        ticks,
        final_phase: snapshot.phase,
        wave: snapshot.wave.number,
        level: snapshot.player.level,
        experience: snapshot.player.experience,
        hp: snapshot.player.hp,
        score: snapshot.score,
        save_id: None,
    })
}

/// Sleep until the next tick, adjusting for time scale.
fn pace(next_tick_time: &mut Instant, time_scale: f64) {
    let effective_tick_duration = if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    };

    *next_tick_time += effective_tick_duration;
    let now = Instant::now();
    if *next_tick_time > now {
        std::thread::sleep(*next_tick_time - now);
    } else if now - *next_tick_time > effective_tick_duration * 2 {
        // Too far behind; reset instead of catching up
        *next_tick_time = now;
    }
}

/// Store the run as a new save slot. Returns the new id on success.
pub fn record_run(store: &SaveStore, title: &str, summary: &RunSummary) -> Option<u32> {
    let save = NewSave {
        experience: summary.experience,
        level: summary.level.max(1),
        wave: summary.wave.max(1),
        ..NewSave::fresh(title, summary.class)
    };
    match store.try_add_save_state(&save) {
        Ok(id) => {
            info!(id, path = %store.path().display(), "run saved");
            Some(id)
        }
        Err(e) => {
            warn!(error = %e, "run was not saved");
            None
        }
    }
}
