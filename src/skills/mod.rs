//! Skill runtime: owned skill instances, the loadout and cast resolution.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
