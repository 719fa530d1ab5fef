//! Run state and the per-tick game loop.

pub mod combat_math;
pub mod constants;
pub mod run_state;
pub mod tick;

pub use combat_math::*;
pub use constants::*;
pub use run_state::*;
pub use tick::*;
