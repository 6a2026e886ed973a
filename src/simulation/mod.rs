//! Composed campaign: leader, wars and territories driven day by day

pub mod actions;
pub mod leader;
pub mod output;
pub mod state;

pub use leader::Leader;
pub use output::{SimulationOutput, SimulationStats};
pub use state::{DayReport, GameState};
