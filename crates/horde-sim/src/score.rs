//! Running score for a single run.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities.

use horde_core::state::ScoreView;

#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub enemies_killed: u32,
    pub waves_cleared: u32,
    /// Total HP the player lost.
    pub damage_taken: u32,
    pub run_time_secs: f64,
}

impl ScoreState {
    pub fn view(&self) -> ScoreView {
        ScoreView {
            enemies_killed: self.enemies_killed,
            waves_cleared: self.waves_cleared,
            damage_taken: self.damage_taken,
            run_time_secs: self.run_time_secs,
        }
    }
}
