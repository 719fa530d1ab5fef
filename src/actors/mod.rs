//! Player and enemy runtime state.

pub mod enemy;
pub mod player;

pub use enemy::*;
pub use player::*;
