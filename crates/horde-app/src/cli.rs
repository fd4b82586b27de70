use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use horde_core::enums::CharacterClass;

/// Run HORDE headless with a scripted player.
#[derive(Debug, Clone, Parser)]
#[clap(name = "horde", version)]
pub struct Cli {
    /// JSON engine config; defaults are used when omitted.
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    /// Overrides the config seed.
    #[clap(short, long)]
    pub seed: Option<u64>,
    /// Tick budget before the run is stopped.
    #[clap(short, long, default_value_t = 36_000)]
    pub ticks: u64,
    #[clap(long, value_enum, default_value_t = ClassArg::Survivor)]
    pub class: ClassArg,
    /// Append snapshots to this file as JSON lines.
    #[clap(long)]
    pub snapshots: Option<PathBuf>,
    /// Write every Nth snapshot.
    #[clap(long, default_value_t = 60)]
    pub snapshot_every: u64,
    /// Pace ticks in wall-clock time instead of running flat out.
    #[clap(long)]
    pub realtime: bool,
    /// Record the finished run in the save store under this directory.
    #[clap(long)]
    pub save_dir: Option<PathBuf>,
    #[clap(long, default_value = "headless run")]
    pub title: String,
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassArg {
    Survivor,
    Warrior,
    Mage,
    FireShooter,
}

impl From<ClassArg> for CharacterClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::Survivor => CharacterClass::Survivor,
            ClassArg::Warrior => CharacterClass::Warrior,
            ClassArg::Mage => CharacterClass::Mage,
            ClassArg::FireShooter => CharacterClass::FireShooter,
        }
    }
}
