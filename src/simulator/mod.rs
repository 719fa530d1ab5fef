//! Headless run simulator for balance analysis.
//!
//! Plays whole runs through `RunState` and `game_tick` with an automatic
//! choice policy, so simulated results follow the real rules:
//! - Victory rate per character
//! - Level pacing against the XP table
//! - Synergy frequency
//! - Rewards per run

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{CharacterRecord, SimReport};
pub use runner::{auto_choose, play_run, run_simulation, RunStats};
