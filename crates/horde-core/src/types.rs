//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D vector in arena space (world units, y grows downward like the screen).
pub type Vec2 = glam::DVec2;

/// Opaque handle for an enemy. Allocated monotonically by the engine and
/// never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Rectangular playable area anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

impl WorldBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `point` lies inside the bounds grown by `buffer` on every side.
    pub fn contains(&self, point: Vec2, buffer: f64) -> bool {
        (-buffer..=self.width + buffer).contains(&point.x)
            && (-buffer..=self.height + buffer).contains(&point.y)
    }

    /// Clamp `point` into the bounds shrunk by `inset` on every side.
    pub fn clamp(&self, point: Vec2, inset: f64) -> Vec2 {
        Vec2::new(
            point.x.clamp(inset, (self.width - inset).max(inset)),
            point.y.clamp(inset, (self.height - inset).max(inset)),
        )
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(
            crate::constants::WORLD_WIDTH,
            crate::constants::WORLD_HEIGHT,
        )
    }
}
