//! Magic Survivors - progression and combat rules engine
//!
//! Character and skill tables, a tick-driven run with enemies, skill casts,
//! elemental synergies and evolutions, in-run XP and rewards, and persistent
//! meta upgrades. Rendering and input live outside this crate; callers drive
//! a `RunState` with `core::tick::game_tick` and react to its events.

pub mod actors;
pub mod core;
pub mod data;
pub mod meta;
pub mod progression;
pub mod run;
pub mod simulator;
pub mod skills;
pub mod synergy;
pub mod utils;
